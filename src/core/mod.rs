pub mod frontend;
pub mod state;

pub use crate::domain::model::{Product, TrackedProduct};
pub use crate::domain::ports::{Backend, StateStore};
pub use crate::utils::error::Result;
pub use frontend::{Frontend, FrontendSettings};
pub use state::{ClientState, Session};
