//! Error types for rapport hosts.
//!
//! The simulation itself never fails: unknown ids and degenerate geometry
//! produce empty results. These errors cover the surfaces around it:
//! configuration, parameter parsing, export and strict lookups.

use std::error::Error;
use std::fmt;

/// Result type for rapport operations.
pub type Result<T> = std::result::Result<T, RapportError>;

/// Errors that can occur around the simulation engine.
#[derive(Debug, Clone)]
pub enum RapportError {
    /// Agent-related errors.
    Agent(AgentError),
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for RapportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RapportError::Agent(e) => write!(f, "Agent error: {}", e),
            RapportError::Config(e) => write!(f, "Config error: {}", e),
            RapportError::Io(msg) => write!(f, "I/O error: {}", msg),
            RapportError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for RapportError {}

impl From<std::io::Error> for RapportError {
    fn from(e: std::io::Error) -> Self {
        RapportError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RapportError {
    fn from(e: serde_json::Error) -> Self {
        RapportError::Serialization(e.to_string())
    }
}

/// Agent-related errors.
#[derive(Debug, Clone)]
pub enum AgentError {
    /// No agent with this id in the current population.
    NotFound(String),
    /// No agent at this population index.
    IndexOutOfRange { index: usize, population: usize },
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::NotFound(id) => write!(f, "Agent not found: {}", id),
            AgentError::IndexOutOfRange { index, population } => write!(
                f,
                "Agent index {} out of range (population {})",
                index, population
            ),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(
                    f,
                    "{} out of range: {} (must be {}-{})",
                    field, value, min, max
                )
            }
        }
    }
}

// Convenience constructors
impl RapportError {
    pub fn agent_not_found(id: impl Into<String>) -> Self {
        RapportError::Agent(AgentError::NotFound(id.into()))
    }

    pub fn index_out_of_range(index: usize, population: usize) -> Self {
        RapportError::Agent(AgentError::IndexOutOfRange { index, population })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RapportError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        RapportError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let e = RapportError::agent_not_found("A-0-1-abc");
        assert_eq!(e.to_string(), "Agent error: Agent not found: A-0-1-abc");

        let e = RapportError::out_of_range("restitution", 0.0, 1.0, 1.5);
        assert_eq!(e.to_string(), "Config error: restitution out of range: 1.5 (must be 0-1)");
    }

    #[test]
    fn json_errors_convert() {
        let err: RapportError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, RapportError::Serialization(_)));
    }
}
