//! Views of the front end. Each one issues at most one backend request per
//! user action and reports what to show through [`ViewState`].

pub mod catalog;
pub mod chat;
pub mod saved;
pub mod search;
pub mod session;
pub mod tracker;
pub mod view;

pub use chat::{ChatMessage, ChatSession, ChatTurn, Role};
pub use saved::SavedItems;
pub use tracker::{Dashboard, TrackState};
pub use view::ViewState;
