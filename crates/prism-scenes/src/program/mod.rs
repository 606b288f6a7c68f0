//! Scene composition.
//!
//! `compose()` turns a variant tag into a fresh [`Scene`] (its own parameter
//! set), the WGSL program that evaluates it per pixel, and its plane mesh.
//! Nothing is shared between two compositions, so a switch can never leak
//! parameters from the previous scene.

pub mod layers;

use std::fmt;

use prism_engine::device::BackendTier;
use prism_sdf::wgsl;

use crate::error::SceneError;
use crate::mesh::MeshGeometry;
use crate::scenes::Scene;
use crate::variant::SceneVariant;

const PRELUDE: &str = include_str!("../shaders/prelude.wgsl");
const PLANE: &str = include_str!("../shaders/plane.wgsl");
const FIELD_2D: &str = include_str!("../shaders/field2d.wgsl");
const RAYMARCH: &str = include_str!("../shaders/raymarch.wgsl");
const WAVE: &str = include_str!("../shaders/wave.wgsl");

/// Shading quality, fixed once from the negotiated backend tier.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PipelineFlavor {
    /// Anti-aliased edges, isoline bands, lighting, march rings.
    Rich,
    /// Hard-edged fills and flat shading.
    Baseline,
}

impl PipelineFlavor {
    pub fn for_tier(tier: BackendTier) -> Self {
        match tier {
            BackendTier::PreferredGpu | BackendTier::SecondaryGpu => PipelineFlavor::Rich,
            BackendTier::Baseline => PipelineFlavor::Baseline,
        }
    }

    fn is_rich(self) -> bool {
        self == PipelineFlavor::Rich
    }
}

impl fmt::Display for PipelineFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineFlavor::Rich => "rich",
            PipelineFlavor::Baseline => "baseline",
        })
    }
}

/// Complete WGSL program of one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneProgram {
    pub variant: SceneVariant,
    pub flavor: PipelineFlavor,
    pub source: String,
}

impl SceneProgram {
    pub fn label(&self) -> String {
        format!("prism {} scene ({})", self.variant, self.flavor)
    }
}

/// Output of [`compose`]: scene state, its program and its mesh.
#[derive(Debug, Clone)]
pub struct ComposedScene {
    pub scene: Scene,
    pub program: SceneProgram,
    pub mesh: MeshGeometry,
}

/// Builds the scene for `variant`.
///
/// Deterministic: the same variant and flavor always produce the same
/// program text and mesh.
pub fn compose(variant: SceneVariant, flavor: PipelineFlavor) -> Result<ComposedScene, SceneError> {
    let scene = Scene::new(variant)
        .ok_or_else(|| SceneError::construction(variant, "nothing to compose"))?;

    if !scene.is_well_formed() {
        return Err(SceneError::construction(variant, "composition tree is malformed"));
    }

    let mesh = MeshGeometry::plane(scene.plane());
    if mesh.is_empty() {
        return Err(SceneError::construction(variant, "empty mesh"));
    }

    let source = assemble(variant, flavor, &scene.generated_wgsl());
    log::debug!("composed {variant} scene: {} bytes of WGSL", source.len());

    Ok(ComposedScene {
        scene,
        program: SceneProgram { variant, flavor, source },
        mesh,
    })
}

fn assemble(variant: SceneVariant, flavor: PipelineFlavor, generated: &str) -> String {
    let header = format!(
        "// prism {variant} scene, {flavor} pipeline\nconst RICH: bool = {};\n",
        flavor.is_rich()
    );

    let parts: Vec<&str> = match variant {
        SceneVariant::Wave => vec![header.as_str(), PRELUDE, generated, WAVE],
        SceneVariant::Raymarch => vec![header.as_str(), PRELUDE, wgsl::LIBRARY, generated, PLANE, RAYMARCH],
        _ => vec![header.as_str(), PRELUDE, wgsl::LIBRARY, generated, PLANE, FIELD_2D],
    };

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_follows_tier() {
        assert_eq!(PipelineFlavor::for_tier(BackendTier::PreferredGpu), PipelineFlavor::Rich);
        assert_eq!(PipelineFlavor::for_tier(BackendTier::SecondaryGpu), PipelineFlavor::Rich);
        assert_eq!(PipelineFlavor::for_tier(BackendTier::Baseline), PipelineFlavor::Baseline);
    }

    #[test]
    fn none_cannot_be_composed() {
        let err = compose(SceneVariant::None, PipelineFlavor::Rich).unwrap_err();
        assert!(matches!(err, SceneError::Construction { variant: SceneVariant::None, .. }));
    }

    #[test]
    fn compose_is_deterministic() {
        for v in SceneVariant::SCENES {
            let a = compose(v, PipelineFlavor::Rich).unwrap();
            let b = compose(v, PipelineFlavor::Rich).unwrap();
            assert_eq!(a.program, b.program);
            assert_eq!(a.mesh, b.mesh);
        }
    }

    #[test]
    fn flavor_only_changes_the_switch() {
        let rich = compose(SceneVariant::SdfGallery, PipelineFlavor::Rich).unwrap();
        let base = compose(SceneVariant::SdfGallery, PipelineFlavor::Baseline).unwrap();
        assert!(rich.program.source.contains("const RICH: bool = true;"));
        assert!(base.program.source.contains("const RICH: bool = false;"));
        // Past the two header lines the programs are identical.
        assert!(rich.program.source.lines().skip(2).eq(base.program.source.lines().skip(2)));
    }

    #[test]
    fn mesh_sizes_match_variant_defaults() {
        let expect = [
            (SceneVariant::Wave, 128, 128),
            (SceneVariant::SdfGallery, 64, 32),
            (SceneVariant::ParallaxVehicle, 64, 64),
            (SceneVariant::Raymarch, 64, 64),
        ];
        for (v, ws, hs) in expect {
            let c = compose(v, PipelineFlavor::Rich).unwrap();
            assert_eq!(c.mesh.vertices.len(), ((ws + 1) * (hs + 1)) as usize, "{v}");
            assert_eq!(c.mesh.index_count(), 6 * ws * hs, "{v}");
        }
    }

    fn validate(source: &str) -> Result<(), String> {
        let module = wgpu::naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;
        wgpu::naga::valid::Validator::new(
            wgpu::naga::valid::ValidationFlags::all(),
            wgpu::naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| format!("{e:?}"))?;
        Ok(())
    }

    #[test]
    fn every_program_is_valid_wgsl() {
        for v in SceneVariant::SCENES {
            for flavor in [PipelineFlavor::Rich, PipelineFlavor::Baseline] {
                let c = compose(v, flavor).unwrap();
                if let Err(e) = validate(&c.program.source) {
                    panic!("{v} ({flavor}) failed validation:\n{e}\n{}", c.program.source);
                }
            }
        }
    }
}
