mod config;

use anyhow::Result;
use prism_engine::coords::{ColorRgba, Viewport};
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::{BackendTier, GpuInit};
use prism_engine::input::Key;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};
use prism_scenes::{FrameDriver, GpuSceneDevice, PipelineFlavor, SceneVariant};

use crate::config::StudioConfig;

const CLEAR: ColorRgba = ColorRgba::new(0.02, 0.02, 0.03, 1.0);

/// Keyboard stand-in for the scene button panel.
fn variant_for_digit(digit: u8) -> Option<SceneVariant> {
    match digit {
        0 => Some(SceneVariant::None),
        1 => Some(SceneVariant::Wave),
        2 => Some(SceneVariant::SdfGallery),
        3 => Some(SceneVariant::ParallaxVehicle),
        4 => Some(SceneVariant::Raymarch),
        _ => None,
    }
}

struct Studio {
    config: StudioConfig,
    /// Built on the first frame, once the device exists.
    driver: Option<FrameDriver<GpuSceneDevice>>,
    tier: Option<BackendTier>,
    viewport: Viewport,
    shown: Option<SceneVariant>,
}

impl Studio {
    fn new(config: StudioConfig) -> Self {
        Self { config, driver: None, tier: None, viewport: Viewport::default(), shown: None }
    }

    fn title(&self, variant: SceneVariant) -> String {
        match self.tier {
            Some(tier) => format!("{} | {variant} | {tier}", self.config.title),
            None => self.config.title.clone(),
        }
    }
}

impl App for Studio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if self.driver.is_none() {
            let tier = ctx.gpu.tier();
            let flavor = PipelineFlavor::for_tier(tier);
            let device = GpuSceneDevice::new(
                ctx.gpu.device().clone(),
                ctx.gpu.queue().clone(),
                ctx.gpu.surface_format(),
                flavor,
            );
            log::info!("scene pipeline: {flavor} on {tier} tier");
            self.tier = Some(tier);
            self.driver = Some(FrameDriver::new(device, flavor));
        }
        let Some(driver) = self.driver.as_mut() else { return AppControl::Continue };

        let viewport = ctx.window.viewport();
        if viewport != self.viewport {
            driver.resize(viewport.width.round() as u32, viewport.height.round() as u32);
            self.viewport = viewport;
        }

        if self.shown.is_none() {
            // The studio stays up with no scene; the manager logs the warning.
            if let Err(e) = driver.select(self.config.initial_variant) {
                log::debug!("initial scene not shown: {e}");
            }
        }

        for event in &ctx.input_frame.events {
            driver.handle_event(event);
        }

        let mut digits: Vec<u8> = ctx.input_frame.keys_pressed.iter().filter_map(|k| k.digit()).collect();
        digits.sort_unstable();
        for variant in digits.into_iter().filter_map(variant_for_digit) {
            if let Err(e) = driver.select(variant) {
                log::debug!("key selection of {variant} failed: {e}");
            }
        }

        let dt = ctx.time.dt;
        let control = ctx.render(CLEAR, |target| {
            driver.frame(dt, target);
        });

        let active = driver.active();
        if self.shown != Some(active) {
            self.shown = Some(active);
            ctx.runtime.set_title(self.title(active));
        }

        control
    }

    fn on_exit(&mut self) {
        if let Some(driver) = self.driver.as_mut() {
            driver.shutdown();
        }
    }
}

fn run() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_env();
    log::info!(
        "prism studio: keys 1-4 select a scene, 0 clears, Esc quits (initial: {})",
        config.initial_variant
    );

    let runtime = RuntimeConfig { title: config.title.clone(), ..Default::default() };
    let gpu_init = GpuInit { skip_tiers: config.skip_tiers.clone(), ..Default::default() };

    Runtime::run(runtime, gpu_init, Studio::new(config))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("prism-studio: {e:#}");
        std::process::exit(1);
    }
}
