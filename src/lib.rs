pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{ApiClient, LocalStore};
pub use app::ViewState;
pub use config::Settings;
pub use core::{Frontend, FrontendSettings};
pub use utils::error::{PriceWiseError, Result};
