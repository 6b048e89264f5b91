pub mod validation_service;

pub use validation_service::{validate_task, validate_user_message, ValidationError};
