/// Error taxonomy for plane alignment and its input readers
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResliceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResliceError {
    /// Fewer than three points were supplied.
    #[error("need 3 points to define a plane, found {found}")]
    InsufficientPoints { found: usize },

    /// The points are collinear, coincident or not finite, so the plane normal is undefined.
    #[error("points are collinear or coincident; plane normal is undefined")]
    DegenerateInput,

    /// An arcsine argument fell outside [-1, 1] by more than rounding error.
    #[error("asin argument for {component} component out of range: {value}")]
    NumericRange { component: char, value: f64 },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
