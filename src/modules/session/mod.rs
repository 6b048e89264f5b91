pub mod registry;
pub mod state;

pub use registry::{RegistryError, SessionRegistry};
pub use state::{SessionState, TurnEntry, TurnPhase, TurnRole};
