//! Centralized user-facing messages and the `msg_*` output macros.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
