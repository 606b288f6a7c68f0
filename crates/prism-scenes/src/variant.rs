use std::fmt;
use std::str::FromStr;

use crate::error::SceneError;

/// Scene selector. `None` means no scene owns GPU resources.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum SceneVariant {
    #[default]
    None,
    Wave,
    SdfGallery,
    ParallaxVehicle,
    Raymarch,
}

impl SceneVariant {
    /// Every variant that renders something.
    pub const SCENES: [SceneVariant; 4] = [
        SceneVariant::Wave,
        SceneVariant::SdfGallery,
        SceneVariant::ParallaxVehicle,
        SceneVariant::Raymarch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneVariant::None => "none",
            SceneVariant::Wave => "wave",
            SceneVariant::SdfGallery => "sdf-gallery",
            SceneVariant::ParallaxVehicle => "parallax-vehicle",
            SceneVariant::Raymarch => "raymarch",
        }
    }

    pub fn is_none(self) -> bool {
        self == SceneVariant::None
    }
}

impl fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneVariant {
    type Err = SceneError;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        match tag.as_str() {
            "none" => Ok(SceneVariant::None),
            "wave" => Ok(SceneVariant::Wave),
            "sdf-gallery" | "sdfgallery" | "gallery" => Ok(SceneVariant::SdfGallery),
            "parallax-vehicle" | "parallaxvehicle" | "vehicle" => Ok(SceneVariant::ParallaxVehicle),
            "raymarch" => Ok(SceneVariant::Raymarch),
            _ => Err(SceneError::InvalidVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("Wave".parse::<SceneVariant>().unwrap(), SceneVariant::Wave);
        assert_eq!("SdfGallery".parse::<SceneVariant>().unwrap(), SceneVariant::SdfGallery);
        assert_eq!("sdf_gallery".parse::<SceneVariant>().unwrap(), SceneVariant::SdfGallery);
        assert_eq!("PARALLAX-VEHICLE".parse::<SceneVariant>().unwrap(), SceneVariant::ParallaxVehicle);
        assert_eq!(" raymarch ".parse::<SceneVariant>().unwrap(), SceneVariant::Raymarch);
        assert_eq!("None".parse::<SceneVariant>().unwrap(), SceneVariant::None);
    }

    #[test]
    fn unknown_tag_is_invalid_variant() {
        let err = "teapot".parse::<SceneVariant>().unwrap_err();
        assert_eq!(err, SceneError::InvalidVariant("teapot".to_string()));
    }

    #[test]
    fn names_round_trip() {
        for v in SceneVariant::SCENES {
            assert_eq!(v.name().parse::<SceneVariant>().unwrap(), v);
        }
    }
}
