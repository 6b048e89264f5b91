pub mod endpoints;
pub mod services;
pub mod types;

pub use endpoints::{router, AppState};
