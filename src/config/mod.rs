pub mod character;
pub mod settings;

pub use character::{Character, CharacterError};
pub use settings::{ConfigError, Settings, VectorStoreKind};
