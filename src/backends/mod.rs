//! Emit backends

pub mod console;
#[cfg(feature = "log-backend")]
pub mod log_crate;

pub use console::{reset_process_sink, set_process_sink, ConsoleBackend};
#[cfg(feature = "log-backend")]
pub use log_crate::{translate_level, LogCrateBackend};

// Re-export the boundary trait next to its implementations
pub use crate::core::Emit;
