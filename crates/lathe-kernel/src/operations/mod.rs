pub mod lathe;

/// Errors from solid-construction operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LatheError {
    #[error("profile needs at least {required} points, got {provided}")]
    InsufficientProfile { required: usize, provided: usize },

    #[error("revolution needs at least {required} segments, got {provided}")]
    InsufficientSegments { required: usize, provided: usize },

    #[error("revolution angle {value} degrees sweeps no volume")]
    InvalidAngle { value: f64 },
}
