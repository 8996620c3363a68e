// Adapters layer: concrete implementations of the domain ports (http backend, local state, csv export).

pub mod csv_export;
pub mod http;
pub mod storage;

pub use http::ApiClient;
pub use storage::LocalStore;
