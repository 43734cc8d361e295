use std::path::PathBuf;

use crate::light::Capability;
use crate::types::ColorKind;

/// All error types that can occur when working with lights and colors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Arithmetic was attempted between colors of different kinds.
    #[error("unsupported operand types for {operation}: '{lhs}' and '{rhs}'")]
    TypeMismatch {
        operation: &'static str,
        lhs: ColorKind,
        rhs: ColorKind,
    },

    /// The light cannot fulfill a read or write of the given capability.
    #[error("light {light:?} does not support {capability}")]
    NotSupported {
        light: String,
        capability: Capability,
    },

    /// No light matched the requested name.
    #[error("no light named {0:?}")]
    LightNotFound(String),

    /// A light system failed to establish connectivity.
    #[error("failed to connect to {system}: {reason}")]
    Connect { system: String, reason: String },

    /// A light system was used before `connect` succeeded.
    #[error("{0} is not connected")]
    NotConnected(String),

    /// A caller supplied a value outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A palette lookup used a name the palette does not contain.
    #[error("unrecognized color {name:?}, try one of these: {valid}")]
    UnknownColor { name: String, valid: String },

    /// An HTTP request to a bridge failed at the transport level.
    #[error("http {action} error: {err}")]
    Http {
        action: String,
        err: reqwest::Error,
    },

    /// Attempted to send a light state update with no attributes set.
    #[error("invalid state update; no attributes set")]
    NoAttribute,

    /// The bridge answered with an error entry.
    #[error("bridge error {kind} at {address}: {description}")]
    Bridge {
        kind: u16,
        address: String,
        description: String,
    },

    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0}")]
    JsonLoad(serde_json::Error),

    /// The configuration file could not be read or written.
    #[error("config file {path:?}: {err}")]
    Config {
        path: PathBuf,
        err: std::io::Error,
    },
}

impl Error {
    pub fn type_mismatch(operation: &'static str, lhs: ColorKind, rhs: ColorKind) -> Self {
        Error::TypeMismatch {
            operation,
            lhs,
            rhs,
        }
    }

    pub fn not_supported(light: &str, capability: Capability) -> Self {
        Error::NotSupported {
            light: light.to_string(),
            capability,
        }
    }

    pub fn connect(system: &str, reason: impl Into<String>) -> Self {
        Error::Connect {
            system: system.to_string(),
            reason: reason.into(),
        }
    }

    pub fn http(action: &str, err: reqwest::Error) -> Self {
        Error::Http {
            action: action.to_string(),
            err,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Whether the error is a transport failure worth retrying.
    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, Error::Http { err, .. } if err.is_timeout() || err.is_connect() || err.is_request())
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
