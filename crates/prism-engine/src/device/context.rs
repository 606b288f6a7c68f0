use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::negotiate::{negotiate, BackendTier, TierProbe};
use super::surface;
use super::{BackendUnavailable, GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - negotiates a backend tier and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and provides an encoder + view for rendering
pub struct Gpu<'w> {
    /// Tier the context was negotiated on.
    tier: BackendTier,

    /// wgpu instance used to create the adapter and surface. Kept alive for
    /// the lifetime of the surface.
    #[allow(dead_code)]
    instance: wgpu::Instance,

    /// Surface bound to the window.
    surface: wgpu::Surface<'w>,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

/// Everything one successful tier probe produces.
struct TierContext<'w> {
    instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

/// Probes tiers against a real window. Each attempt gets its own instance so
/// a tier never sees adapters from another tier's backends.
struct WgpuProbe<'w> {
    window: &'w Window,
    required_features: wgpu::Features,
}

impl<'w> TierProbe for WgpuProbe<'w> {
    type Context = TierContext<'w>;

    fn probe(&mut self, tier: BackendTier) -> Result<TierContext<'w>, BackendUnavailable> {
        let unavailable = |what: &str, err: &dyn std::fmt::Display| {
            BackendUnavailable::new(tier, format!("{what}: {err}"))
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: tier.backends(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(self.window)
            .map_err(|e| unavailable("failed to create surface", &e))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: tier.power_preference(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: tier.force_fallback_adapter(),
        }))
        .map_err(|e| unavailable("no adapter", &e))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("prism-engine device"),
            required_features: self.required_features,
            required_limits: tier.limits(&adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| unavailable("device request failed", &e))?;

        let info = adapter.get_info();
        log::info!(
            "{tier} tier: adapter `{}` ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        Ok(TierContext { instance, surface, adapter, device, queue })
    }
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Blocks while tiers are probed. Fails with a [`super::BackendFatal`] in
    /// the error chain when no tier, not even the baseline, is usable.
    pub fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            desired_maximum_frame_latency,
            skip_tiers,
        } = init;

        let mut probe = WgpuProbe { window, required_features };
        let negotiated = negotiate(&mut probe, &skip_tiers)?;
        let tier = negotiated.tier;
        let TierContext { instance, surface, adapter, device, queue } = negotiated.context;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps, prefer_srgb)
            .with_context(|| format!("{tier} tier offers no supported surface formats"))?;

        let alpha_mode = surface::choose_alpha_mode(&surface_caps, alpha_mode);
        let present_mode = surface::choose_present_mode(&surface_caps, present_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        Ok(Self {
            tier,
            instance,
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the negotiated backend tier.
    pub fn tier(&self) -> BackendTier {
        self.tier
    }

    /// Returns information about the selected adapter.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prism frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        drop(frame.surface_texture);
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}
