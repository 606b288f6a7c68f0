//! Studio settings read from the environment.

use prism_engine::device::BackendTier;
use prism_scenes::SceneVariant;

pub const VARIANT_VAR: &str = "PRISM_VARIANT";
pub const SKIP_TIERS_VAR: &str = "PRISM_SKIP_TIERS";
pub const TITLE_VAR: &str = "PRISM_TITLE";

#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub title: String,
    /// Scene selected once the GPU is ready.
    pub initial_variant: SceneVariant,
    /// Tiers treated as unavailable during negotiation.
    pub skip_tiers: Vec<BackendTier>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "prism studio".to_string(),
            initial_variant: SceneVariant::None,
            skip_tiers: Vec::new(),
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(VARIANT_VAR).ok().as_deref(),
            std::env::var(SKIP_TIERS_VAR).ok().as_deref(),
            std::env::var(TITLE_VAR).ok(),
        )
    }

    /// Invalid entries are logged and replaced by defaults.
    pub fn from_values(variant: Option<&str>, skip_tiers: Option<&str>, title: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(tag) = variant {
            match tag.parse::<SceneVariant>() {
                Ok(v) => config.initial_variant = v,
                Err(e) => log::warn!("{VARIANT_VAR}: {e}; starting without a scene"),
            }
        }

        if let Some(list) = skip_tiers {
            for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match item.parse::<BackendTier>() {
                    Ok(tier) if !config.skip_tiers.contains(&tier) => config.skip_tiers.push(tier),
                    Ok(_) => {}
                    Err(e) => log::warn!("{SKIP_TIERS_VAR}: {e}"),
                }
            }
        }

        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            config.title = title;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(StudioConfig::from_values(None, None, None), StudioConfig::default());
    }

    #[test]
    fn parses_all_values() {
        let c = StudioConfig::from_values(
            Some("vehicle"),
            Some("preferred, gl,preferred"),
            Some("demo".to_string()),
        );
        assert_eq!(c.initial_variant, SceneVariant::ParallaxVehicle);
        assert_eq!(c.skip_tiers, vec![BackendTier::PreferredGpu, BackendTier::SecondaryGpu]);
        assert_eq!(c.title, "demo");
    }

    #[test]
    fn invalid_entries_fall_back() {
        let c = StudioConfig::from_values(Some("teapot"), Some("quantum,baseline"), Some("  ".into()));
        assert_eq!(c.initial_variant, SceneVariant::None);
        assert_eq!(c.skip_tiers, vec![BackendTier::Baseline]);
        assert_eq!(c.title, "prism studio");
    }
}
