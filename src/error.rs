use std::fmt;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IviError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out after {timeout:?} waiting for a reply to {command:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("Invalid channel {index}, instrument has {count} output(s)")]
    InvalidChannel { index: usize, count: usize },

    #[error("Could not decode reply {reply:?} as {expected}")]
    Decode {
        expected: &'static str,
        reply: String,
    },

    #[error("Unsupported model {model:?}, driver supports {supported:?}")]
    UnsupportedModel {
        model: String,
        supported: Vec<&'static str>,
    },

    #[error("Unsupported value {value} for {attribute}")]
    UnsupportedValue {
        attribute: &'static str,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IviError {
    /// True for failures reported by the session rather than by the driver.
    pub fn is_transport(&self) -> bool {
        matches!(self, IviError::Transport(_) | IviError::Timeout { .. })
    }

    pub(crate) fn decode(expected: &'static str, reply: &str) -> Self {
        IviError::Decode {
            expected,
            reply: reply.to_owned(),
        }
    }
}

pub type IviResult<T> = std::result::Result<T, IviError>;

/// Returned by `Driver::new` when the optional reset fails. The driver itself
/// was fully built and can be recovered with [`ResetError::into_driver`].
#[derive(Error)]
#[error("Reset during construction failed: {source}")]
pub struct ResetError<D> {
    driver: D,
    #[source]
    source: IviError,
}

impl<D> ResetError<D> {
    pub(crate) fn new(driver: D, source: IviError) -> Self {
        ResetError { driver, source }
    }

    pub fn error(&self) -> &IviError {
        &self.source
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn into_parts(self) -> (D, IviError) {
        (self.driver, self.source)
    }
}

impl<D> fmt::Debug for ResetError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetError")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<D> From<ResetError<D>> for IviError {
    fn from(err: ResetError<D>) -> Self {
        err.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_channel_message_names_index() {
        let err = IviError::InvalidChannel { index: 1, count: 1 };
        assert_eq!(
            err.to_string(),
            "Invalid channel 1, instrument has 1 output(s)"
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn timeout_counts_as_transport() {
        let err = IviError::Timeout {
            command: "VOLT?".into(),
            timeout: Duration::from_millis(10),
        };
        assert!(err.is_transport());
        assert!(IviError::Transport("bus fault".into()).is_transport());
    }

    #[test]
    fn reset_error_keeps_driver_and_converts() {
        let err = ResetError::new(42u8, IviError::Transport("gone".into()));
        assert_eq!(*err.driver(), 42);
        assert!(err.error().is_transport());
        let plain: IviError = err.into();
        assert!(matches!(plain, IviError::Transport(ref m) if m == "gone"));
    }
}
