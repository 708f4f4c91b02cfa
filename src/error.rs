//! Error types for configuration loading and browser startup

/// Errors raised while loading or validating a body fact sheet.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The fact sheet is not valid JSON or does not match the schema.
    #[error("failed to parse fact sheet: {0}")]
    Parse(#[from] serde_json::Error),

    /// Eccentricity outside [0, 1) would make the orbit open or degenerate.
    #[error("{body}: eccentricity {value} must be in [0, 1)")]
    Eccentricity { body: String, value: f32 },

    /// A length (semi-major axis, size, radius) that is not positive and finite.
    #[error("{body}: {field} must be a positive finite number, got {value}")]
    NonPositive {
        body: String,
        field: &'static str,
        value: f32,
    },

    /// A value that must merely be finite (speed, rotation, starting angle).
    #[error("{body}: {field} must be finite, got {value}")]
    NonFinite {
        body: String,
        field: &'static str,
        value: f32,
    },

    /// The sheet declares no orbiting bodies.
    #[error("fact sheet declares no bodies")]
    NoBodies,
}

/// Errors raised while wiring the app into the page.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("no global window")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("missing required element #{0}")]
    MissingElement(&'static str),

    #[error("element #{id} is not a {expected}")]
    WrongElement {
        id: &'static str,
        expected: &'static str,
    },

    #[error("canvas has no 2d rendering context")]
    NoContext,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_body() {
        let err = ConfigError::Eccentricity {
            body: "Mercury".to_string(),
            value: 1.2,
        };
        assert_eq!(err.to_string(), "Mercury: eccentricity 1.2 must be in [0, 1)");

        let err = InitError::from(ConfigError::NoBodies);
        assert_eq!(err.to_string(), "fact sheet declares no bodies");
    }
}
