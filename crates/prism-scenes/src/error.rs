use std::fmt;

use crate::variant::SceneVariant;

/// Scene-level failures. Neither is fatal: the manager rolls back to idle on
/// `Construction`, and `InvalidVariant` leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Composer or device could not build the scene.
    Construction { variant: SceneVariant, reason: String },
    /// Unknown variant tag from the command surface.
    InvalidVariant(String),
}

impl SceneError {
    pub fn construction(variant: SceneVariant, reason: impl Into<String>) -> Self {
        SceneError::Construction { variant, reason: reason.into() }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Construction { variant, reason } => {
                write!(f, "failed to construct {variant} scene: {reason}")
            }
            SceneError::InvalidVariant(tag) => write!(f, "unknown scene variant `{tag}`"),
        }
    }
}

impl std::error::Error for SceneError {}
