use super::BackendTier;

/// Initialization parameters for the GPU layer.
///
/// Limits are not configured here: each [`BackendTier`] requests the limits
/// its class of adapter can be expected to meet.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features. Keep empty unless strictly necessary; every
    /// feature listed here narrows the set of tiers that can succeed.
    pub required_features: wgpu::Features,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,

    /// Tiers to treat as unavailable without probing.
    ///
    /// The baseline tier cannot be skipped; it is always attempted last.
    pub skip_tiers: Vec<BackendTier>,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            desired_maximum_frame_latency: 2,
            skip_tiers: Vec::new(),
        }
    }
}
