pub mod chat;
pub mod emotion;
pub mod events;
pub mod memory;
pub mod plugins;
pub mod session;
