//! Unexpected-failure wrapper for captured panics

use std::any::Any;

/// Failure value produced when a computation body panics instead of
/// returning through the failure channel.
///
/// The driver catches the unwind at its outermost boundary and folds the
/// payload into the resolved result, so callers never observe the panic
/// itself. Only the panic message survives the crossing; payloads that are
/// not `&str` or `String` are replaced with a fixed description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected failure: {message}")]
pub struct Fault {
    message: String,
}

impl Fault {
    /// Create a fault with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The captured panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "panic payload of unknown type".to_string()
        };
        Self { message }
    }
}

impl From<Fault> for String {
    fn from(fault: Fault) -> Self {
        fault.message
    }
}
