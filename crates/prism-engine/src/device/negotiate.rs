//! Backend tier negotiation.
//!
//! The runtime needs exactly one rendering context. Tiers are tried in a fixed
//! order and the first one that produces a context wins:
//!
//! | tier           | backends               | adapter                 |
//! |----------------|------------------------|-------------------------|
//! | `PreferredGpu` | Vulkan / Metal / DX12  | high performance        |
//! | `SecondaryGpu` | GL / WebGL2            | any, downlevel limits   |
//! | `Baseline`     | all                    | forced fallback adapter |
//!
//! The state machine itself is backend-agnostic: probing a tier is delegated to
//! a [`TierProbe`], so the ordering rules can be exercised without a GPU.

use std::fmt;
use std::str::FromStr;

use super::{BackendFatal, BackendUnavailable};

/// A class of rendering backend, in descending order of capability.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum BackendTier {
    PreferredGpu,
    SecondaryGpu,
    Baseline,
}

impl BackendTier {
    /// Negotiation order.
    pub const ORDER: [BackendTier; 3] = [
        BackendTier::PreferredGpu,
        BackendTier::SecondaryGpu,
        BackendTier::Baseline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackendTier::PreferredGpu => "preferred",
            BackendTier::SecondaryGpu => "secondary",
            BackendTier::Baseline => "baseline",
        }
    }

    /// Backends an instance for this tier is allowed to enumerate.
    pub fn backends(self) -> wgpu::Backends {
        match self {
            BackendTier::PreferredGpu => wgpu::Backends::PRIMARY,
            BackendTier::SecondaryGpu => wgpu::Backends::GL,
            BackendTier::Baseline => wgpu::Backends::all(),
        }
    }

    pub fn power_preference(self) -> wgpu::PowerPreference {
        match self {
            BackendTier::PreferredGpu => wgpu::PowerPreference::HighPerformance,
            _ => wgpu::PowerPreference::LowPower,
        }
    }

    /// Baseline asks wgpu for its fallback (software) adapter.
    pub fn force_fallback_adapter(self) -> bool {
        matches!(self, BackendTier::Baseline)
    }

    /// Limits requested from the device, clamped to the adapter resolution.
    pub fn limits(self, adapter: &wgpu::Limits) -> wgpu::Limits {
        let base = match self {
            BackendTier::PreferredGpu => wgpu::Limits::default(),
            BackendTier::SecondaryGpu | BackendTier::Baseline => {
                wgpu::Limits::downlevel_webgl2_defaults()
            }
        };
        base.using_resolution(adapter.clone())
    }

    /// Tier probed after this one fails, if any.
    pub fn next(self) -> Option<BackendTier> {
        match self {
            BackendTier::PreferredGpu => Some(BackendTier::SecondaryGpu),
            BackendTier::SecondaryGpu => Some(BackendTier::Baseline),
            BackendTier::Baseline => None,
        }
    }
}

impl fmt::Display for BackendTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preferred" | "primary" | "preferred-gpu" => Ok(BackendTier::PreferredGpu),
            "secondary" | "gl" | "secondary-gpu" => Ok(BackendTier::SecondaryGpu),
            "baseline" | "fallback" | "software" => Ok(BackendTier::Baseline),
            other => Err(format!("unknown backend tier `{other}`")),
        }
    }
}

/// Negotiation progress.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NegotiationState {
    Start,
    TryPreferred,
    TrySecondary,
    TryBaseline,
    Ready(BackendTier),
    Fatal,
}

impl NegotiationState {
    /// Tier being attempted in this state, if any.
    pub fn attempting(self) -> Option<BackendTier> {
        match self {
            NegotiationState::TryPreferred => Some(BackendTier::PreferredGpu),
            NegotiationState::TrySecondary => Some(BackendTier::SecondaryGpu),
            NegotiationState::TryBaseline => Some(BackendTier::Baseline),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, NegotiationState::Ready(_) | NegotiationState::Fatal)
    }

    /// Transition after the current attempt. `Start` ignores `succeeded`;
    /// terminal states stay put.
    pub fn advance(self, succeeded: bool) -> NegotiationState {
        use NegotiationState::*;
        match (self, succeeded) {
            (Start, _) => TryPreferred,
            (TryPreferred, true) => Ready(BackendTier::PreferredGpu),
            (TrySecondary, true) => Ready(BackendTier::SecondaryGpu),
            (TryBaseline, true) => Ready(BackendTier::Baseline),
            (TryPreferred, false) => TrySecondary,
            (TrySecondary, false) => TryBaseline,
            (TryBaseline, false) => Fatal,
            (terminal, _) => terminal,
        }
    }
}

/// Brings up a rendering context for one tier.
pub trait TierProbe {
    type Context;

    fn probe(&mut self, tier: BackendTier) -> Result<Self::Context, BackendUnavailable>;
}

/// Result of a successful negotiation.
#[derive(Debug)]
pub struct Negotiated<C> {
    pub tier: BackendTier,
    pub context: C,
    /// Tiers that were tried (or skipped) before `tier`, in order.
    pub attempts: Vec<BackendUnavailable>,
}

/// Runs the tier state machine to completion.
///
/// Tiers in `skip` are recorded as unavailable without probing, except the
/// baseline, which is always attempted.
pub fn negotiate<P: TierProbe>(
    probe: &mut P,
    skip: &[BackendTier],
) -> Result<Negotiated<P::Context>, BackendFatal> {
    let mut state = NegotiationState::Start.advance(false);
    let mut attempts = Vec::new();

    while let Some(tier) = state.attempting() {
        let outcome = if tier != BackendTier::Baseline && skip.contains(&tier) {
            Err(BackendUnavailable::new(tier, "skipped by configuration"))
        } else {
            log::debug!("probing {tier} backend tier");
            probe.probe(tier)
        };

        match outcome {
            Ok(context) => {
                state = state.advance(true);
                debug_assert_eq!(state, NegotiationState::Ready(tier));
                if !attempts.is_empty() {
                    log::warn!("rendering on {tier} backend tier after {} failed attempt(s)", attempts.len());
                } else {
                    log::info!("rendering on {tier} backend tier");
                }
                return Ok(Negotiated { tier, context, attempts });
            }
            Err(err) => {
                log::warn!("{err}");
                attempts.push(err);
                state = state.advance(false);
            }
        }
    }

    log::error!("backend negotiation failed on every tier");
    Err(BackendFatal { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Succeeds on the listed tiers and records every probe.
    struct ScriptedProbe {
        available: Vec<BackendTier>,
        probed: Vec<BackendTier>,
    }

    impl ScriptedProbe {
        fn new(available: &[BackendTier]) -> Self {
            Self { available: available.to_vec(), probed: Vec::new() }
        }
    }

    impl TierProbe for ScriptedProbe {
        type Context = BackendTier;

        fn probe(&mut self, tier: BackendTier) -> Result<BackendTier, BackendUnavailable> {
            self.probed.push(tier);
            if self.available.contains(&tier) {
                Ok(tier)
            } else {
                Err(BackendUnavailable::new(tier, "not present"))
            }
        }
    }

    #[test]
    fn preferred_wins_when_available() {
        let mut probe = ScriptedProbe::new(&BackendTier::ORDER);
        let n = negotiate(&mut probe, &[]).unwrap();
        assert_eq!(n.tier, BackendTier::PreferredGpu);
        assert_eq!(n.context, BackendTier::PreferredGpu);
        assert!(n.attempts.is_empty());
        assert_eq!(probe.probed, vec![BackendTier::PreferredGpu]);
    }

    #[test]
    fn falls_back_to_secondary() {
        let mut probe = ScriptedProbe::new(&[BackendTier::SecondaryGpu, BackendTier::Baseline]);
        let n = negotiate(&mut probe, &[]).unwrap();
        assert_eq!(n.tier, BackendTier::SecondaryGpu);
        assert_eq!(n.attempts.len(), 1);
        assert_eq!(n.attempts[0].tier, BackendTier::PreferredGpu);
    }

    #[test]
    fn falls_back_to_baseline() {
        let mut probe = ScriptedProbe::new(&[BackendTier::Baseline]);
        let n = negotiate(&mut probe, &[]).unwrap();
        assert_eq!(n.tier, BackendTier::Baseline);
        assert_eq!(probe.probed, BackendTier::ORDER.to_vec());
    }

    #[test]
    fn fatal_when_nothing_works() {
        let mut probe = ScriptedProbe::new(&[]);
        let err = negotiate(&mut probe, &[]).unwrap_err();
        let tiers: Vec<_> = err.attempts.iter().map(|a| a.tier).collect();
        assert_eq!(tiers, BackendTier::ORDER.to_vec());
        assert!(err.to_string().contains("baseline backend unavailable"));
    }

    #[test]
    fn skipped_tiers_are_not_probed() {
        let mut probe = ScriptedProbe::new(&BackendTier::ORDER);
        let n = negotiate(&mut probe, &[BackendTier::PreferredGpu]).unwrap();
        assert_eq!(n.tier, BackendTier::SecondaryGpu);
        assert_eq!(probe.probed, vec![BackendTier::SecondaryGpu]);
        assert_eq!(n.attempts[0].reason, "skipped by configuration");
    }

    #[test]
    fn baseline_cannot_be_skipped() {
        let mut probe = ScriptedProbe::new(&[BackendTier::Baseline]);
        let n = negotiate(&mut probe, &BackendTier::ORDER).unwrap();
        assert_eq!(n.tier, BackendTier::Baseline);
        assert_eq!(probe.probed, vec![BackendTier::Baseline]);
    }

    #[test]
    fn state_machine_transitions() {
        use NegotiationState::*;
        assert_eq!(Start.advance(true), TryPreferred);
        assert_eq!(TryPreferred.advance(false), TrySecondary);
        assert_eq!(TrySecondary.advance(false), TryBaseline);
        assert_eq!(TryBaseline.advance(false), Fatal);
        assert_eq!(TrySecondary.advance(true), Ready(BackendTier::SecondaryGpu));
        assert_eq!(Fatal.advance(true), Fatal);
        assert_eq!(
            Ready(BackendTier::Baseline).advance(false),
            Ready(BackendTier::Baseline)
        );
        assert!(Fatal.is_terminal());
        assert!(!TryBaseline.is_terminal());
    }

    #[test]
    fn tier_names_parse() {
        assert_eq!("Preferred".parse::<BackendTier>(), Ok(BackendTier::PreferredGpu));
        assert_eq!(" gl ".parse::<BackendTier>(), Ok(BackendTier::SecondaryGpu));
        assert_eq!("software".parse::<BackendTier>(), Ok(BackendTier::Baseline));
        assert!("metal".parse::<BackendTier>().is_err());
    }

    #[test]
    fn only_baseline_forces_fallback() {
        assert!(BackendTier::Baseline.force_fallback_adapter());
        assert!(!BackendTier::PreferredGpu.force_fallback_adapter());
        assert!(!BackendTier::SecondaryGpu.force_fallback_adapter());
    }
}
