use std::fmt;

use super::BackendTier;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// A single backend tier could not be brought up.
///
/// Recovered by the negotiator, which moves on to the next tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUnavailable {
    pub tier: BackendTier,
    pub reason: String,
}

impl BackendUnavailable {
    pub fn new(tier: BackendTier, reason: impl Into<String>) -> Self {
        Self { tier, reason: reason.into() }
    }
}

impl fmt::Display for BackendUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} backend unavailable: {}", self.tier, self.reason)
    }
}

impl std::error::Error for BackendUnavailable {}

/// Every tier failed, including the baseline. Rendering cannot start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFatal {
    pub attempts: Vec<BackendUnavailable>,
}

impl fmt::Display for BackendFatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no rendering backend could be initialized")?;
        for attempt in &self.attempts {
            write!(f, "\n  - {attempt}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendFatal {}
