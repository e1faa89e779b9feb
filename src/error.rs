use thiserror::Error;

/// Errors produced while validating or evaluating a B-spline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    #[error("Invalid knot vector: {0}")]
    InvalidKnotVector(String),

    #[error("Degenerate parameter domain: {0}")]
    DegenerateDomain(String),

    #[error("Expected {expected} control points but {found} were provided.")]
    ControlPointCount { expected: usize, found: usize },

    #[error("Parameter {t} lies outside of the curve domain [{min}, {max}].")]
    ParameterOutOfDomain { t: f64, min: f64, max: f64 },
}

/// Errors produced while reading curve configuration or viewport data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Input ended before a value for `{0}` was read.")]
    MissingValue(&'static str),

    #[error("Could not parse `{token}` as a value for `{name}`.")]
    InvalidNumber { name: &'static str, token: String },

    #[error("Viewport must have non-zero dimensions, got {width}x{height}.")]
    InvalidViewport { width: u32, height: u32 },

    #[error(transparent)]
    Spline(#[from] SplineError),
}
