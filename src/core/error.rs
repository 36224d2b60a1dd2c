use std::fmt;

/// Raised only while turning raw request input into a `SimulationConfig`.
/// Every later pipeline stage is total and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing { field: &'static str },
    Type { field: &'static str, expected: &'static str },
    Range { field: &'static str, constraint: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { field } => write!(f, "missing required field '{}'", field),
            ConfigError::Type { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
            ConfigError::Range { field, constraint } => {
                write!(f, "field '{}' out of range: {}", field, constraint)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn missing(field: &'static str) -> Self { ConfigError::Missing { field } }
    pub fn bad_type(field: &'static str, expected: &'static str) -> Self {
        ConfigError::Type { field, expected }
    }
    pub fn out_of_range(field: &'static str, constraint: &'static str) -> Self {
        ConfigError::Range { field, constraint }
    }

    /// Dotted path of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::Missing { field }
            | ConfigError::Type { field, .. }
            | ConfigError::Range { field, .. } => field,
        }
    }
}
