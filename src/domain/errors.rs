use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the backing file into a typed `Config`.
///
/// Any of these is fatal to construction: no partially loaded store is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("Duplicate section [{section}] on line {line}")]
    DuplicateSection { section: String, line: usize },

    #[error("Duplicate key '{key}' in section [{section}] on line {line}")]
    DuplicateKey {
        section: String,
        key: String,
        line: usize,
    },

    #[error("Missing section [{section}]")]
    MissingSection { section: String },

    #[error("Missing required key '{key}' in section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("Invalid value for {section}.{key}: '{value}' is not a valid {expected}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Errors raised when a caller-supplied update breaks a domain constraint.
///
/// Nothing is mutated and nothing is written when one of these is returned.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Unknown main contract '{symbol}'. Must be one of UVXY, VXX, VIXY, SVIX, UVIX, SVXY")]
    UnknownContract { symbol: String },

    #[error("Unknown contract type '{value}'. Must be 'regular' or 'inverse'")]
    UnknownContractType { value: String },

    #[error("Main contract list must not be empty")]
    EmptyContractList,

    #[error("Stake count mismatch: got {supplied} stakes, {stored} are stored")]
    StakeLengthMismatch { supplied: usize, stored: usize },
}

/// The backing file could not be rewritten.
///
/// The in-memory mutation has already happened, so memory and disk diverge
/// until a later write succeeds.
#[derive(Debug, Error)]
#[error("Failed to persist config to {path:?}: {source}")]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Umbrella error for mutating operations on a `ConfigStore`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_formatting() {
        let error = ParseError::InvalidValue {
            section: "IB".to_string(),
            key: "port".to_string(),
            value: "abc".to_string(),
            expected: "integer",
        };

        let msg = error.to_string();
        assert!(msg.contains("IB.port"));
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("integer"));
    }

    #[test]
    fn test_validation_error_converts_into_config_error() {
        let error: ConfigError = ValidationError::EmptyContractList.into();
        assert!(matches!(
            error,
            ConfigError::Validation(ValidationError::EmptyContractList)
        ));
    }

    #[test]
    fn test_stake_mismatch_formatting() {
        let msg = ValidationError::StakeLengthMismatch {
            supplied: 3,
            stored: 1,
        }
        .to_string();
        assert!(msg.contains("got 3"));
        assert!(msg.contains("1 are stored"));
    }
}
