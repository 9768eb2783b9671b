//! Emit trait: the single boundary between the facade and a backend

use super::message::LogMessage;

/// A backend that consumes log messages.
///
/// Called synchronously on the logging thread, exactly once per entry-point
/// call. There is no return channel: implementations report and swallow their
/// own failures.
///
/// Any `Fn(LogMessage)` closure that is `Send + Sync` is an `Emit`.
pub trait Emit: Send + Sync {
    fn emit(&self, message: LogMessage);
}

impl<F> Emit for F
where
    F: Fn(LogMessage) + Send + Sync,
{
    fn emit(&self, message: LogMessage) {
        self(message)
    }
}
