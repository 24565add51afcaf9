//! Error types for sieve operations.
//!
//! Degenerate statistics (an empty table, a zero expected count) are not
//! errors; they surface as NaN or as a documented convention on the result.
//! Errors are reserved for inputs the engine refuses to interpret.

use std::fmt;

/// Main error type for sieve operations.
///
/// # Examples
///
/// ```
/// use sieve::error::SieveError;
///
/// let err = SieveError::NotCategorical {
///     name: "sepal length".to_string(),
/// };
/// assert!(err.to_string().contains("not categorical"));
/// ```
#[derive(Debug)]
pub enum SieveError {
    /// A variable name or index does not resolve in the domain.
    UnknownVariable {
        /// The name or index that was looked up
        name: String,
    },

    /// A continuous variable was passed where a categorical one is required.
    NotCategorical {
        /// Variable name
        name: String,
    },

    /// A cell label is not among the categories of its variable.
    UnknownLabel {
        /// Variable name
        variable: String,
        /// Offending label
        label: String,
    },

    /// Shapes of columns, rows or domains do not agree.
    DimensionMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Invalid configuration value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// I/O error while reading configuration.
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SieveError::UnknownVariable { name } => {
                write!(f, "Unknown variable: {name}")
            }
            SieveError::NotCategorical { name } => {
                write!(
                    f,
                    "Variable {name} is not categorical; discretize it before tabulating"
                )
            }
            SieveError::UnknownLabel { variable, label } => {
                write!(f, "Unknown label {label:?} for variable {variable}")
            }
            SieveError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            SieveError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            SieveError::Io(e) => write!(f, "I/O error: {e}"),
            SieveError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            SieveError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SieveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SieveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SieveError {
    fn from(err: std::io::Error) -> Self {
        SieveError::Io(err)
    }
}

impl From<serde_json::Error> for SieveError {
    fn from(err: serde_json::Error) -> Self {
        SieveError::Serialization(err.to_string())
    }
}

impl From<&str> for SieveError {
    fn from(msg: &str) -> Self {
        SieveError::Other(msg.to_string())
    }
}

impl From<String> for SieveError {
    fn from(msg: String) -> Self {
        SieveError::Other(msg)
    }
}

impl SieveError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an unknown variable error
    #[must_use]
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for SieveError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SieveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variable_display() {
        let err = SieveError::unknown_variable("petal width");
        assert!(err.to_string().contains("Unknown variable"));
        assert!(err.to_string().contains("petal width"));
    }

    #[test]
    fn test_not_categorical_display() {
        let err = SieveError::NotCategorical {
            name: "age".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("age"));
        assert!(msg.contains("not categorical"));
    }

    #[test]
    fn test_unknown_label_display() {
        let err = SieveError::UnknownLabel {
            variable: "sex".to_string(),
            label: "x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"x\""));
        assert!(msg.contains("sex"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = SieveError::InvalidHyperparameter {
            param: "n_bins".to_string(),
            value: "1".to_string(),
            constraint: ">=2".to_string(),
        };
        assert!(err.to_string().contains("Invalid hyperparameter"));
        assert!(err.to_string().contains("n_bins"));
        assert!(err.to_string().contains(">=2"));
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = SieveError::dimension_mismatch("columns", 3, 2);
        let msg = err.to_string();
        assert!(msg.contains("columns=3"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_from_str() {
        let err: SieveError = "test error".into();
        assert!(matches!(err, SieveError::Other(_)));
        assert!(err == "test error");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").expect_err("invalid json");
        let err: SieveError = json_err.into();
        assert!(matches!(err, SieveError::Serialization(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SieveError::from(io_err);
        assert!(err.source().is_some());
        assert!(SieveError::Other("x".into()).source().is_none());
    }
}
