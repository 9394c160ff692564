// Completion abstraction layer

pub mod azure;
pub mod conversation;
pub mod provider;

pub use provider::*;
