//! GPU seam of the scene lifecycle.
//!
//! [`SceneDevice`] is everything the lifecycle manager needs from a GPU:
//! build a scene's resources, upload its uniforms, draw it, release it.
//! [`GpuSceneDevice`] is the wgpu implementation; tests substitute a
//! recording device.

use std::num::NonZeroU64;

use prism_engine::coords::Viewport;
use prism_engine::render::RenderTarget;
use wgpu::util::DeviceExt;

use crate::error::SceneError;
use crate::mesh::{MeshGeometry, Vertex};
use crate::program::{PipelineFlavor, SceneProgram};
use crate::uniforms::UniformBlock;

pub trait SceneDevice {
    /// Everything one live scene owns on the device.
    type Resources;
    /// What a draw records into.
    type Pass<'p>;

    fn create(
        &mut self,
        program: &SceneProgram,
        mesh: &MeshGeometry,
    ) -> Result<Self::Resources, SceneError>;

    /// Uploads `uniforms` for the next draw.
    fn update(&mut self, resources: &Self::Resources, uniforms: &UniformBlock);

    fn draw(&mut self, resources: &Self::Resources, pass: &mut Self::Pass<'_>);

    /// Releases `resources`. Called exactly once per successful `create`.
    fn destroy(&mut self, resources: Self::Resources);

    fn resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }
}

/// Resources of one live scene.
#[derive(Debug)]
pub struct GpuSceneResources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuSceneResources {
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// wgpu-backed [`SceneDevice`].
///
/// The bind group layout is shared by every scene; pipelines and buffers
/// are per scene and released in [`SceneDevice::destroy`].
pub struct GpuSceneDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    flavor: PipelineFlavor,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl GpuSceneDevice {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        flavor: PipelineFlavor,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism scene bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(UniformBlock::SIZE),
                },
                count: None,
            }],
        });

        Self { device, queue, format, flavor, bind_group_layout }
    }

    pub fn flavor(&self) -> PipelineFlavor {
        self.flavor
    }

    fn create_pipeline(&self, program: &SceneProgram) -> wgpu::RenderPipeline {
        let label = program.label();

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(program.source.as_str().into()),
        });

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism scene pipeline layout"),
            bind_group_layouts: &[&self.bind_group_layout],
            immediate_size: 0,
        });

        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The wave is seen from above after flattening; keep both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn create_resources(&self, program: &SceneProgram, mesh: &MeshGeometry) -> GpuSceneResources {
        let pipeline = self.create_pipeline(program);

        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism scene ubo"),
            size: UniformBlock::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism scene bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism scene vbo"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism scene ibo"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        GpuSceneResources {
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        }
    }
}

impl SceneDevice for GpuSceneDevice {
    type Resources = GpuSceneResources;
    type Pass<'p> = RenderTarget<'p>;

    fn create(
        &mut self,
        program: &SceneProgram,
        mesh: &MeshGeometry,
    ) -> Result<GpuSceneResources, SceneError> {
        if program.flavor != self.flavor {
            return Err(SceneError::construction(
                program.variant,
                format!("program built for {} pipeline, device runs {}", program.flavor, self.flavor),
            ));
        }
        if mesh.is_empty() {
            return Err(SceneError::construction(program.variant, "empty mesh"));
        }

        // Validation and allocation failures are reported through these
        // scopes instead of the device's uncaptured-error handler, which panics.
        let validation = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let out_of_memory = self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let resources = self.create_resources(program, mesh);

        // Scopes pop in reverse push order.
        let oom = pollster::block_on(out_of_memory.pop());
        let invalid = pollster::block_on(validation.pop());

        if let Some(err) = oom.or(invalid) {
            // Drop, not destroy: destroying an invalid buffer raises an unscoped error.
            drop(resources);
            return Err(SceneError::construction(program.variant, err.to_string()));
        }

        log::debug!(
            "created {} ({} vertices, {} indices)",
            program.label(),
            mesh.vertices.len(),
            mesh.index_count()
        );

        Ok(resources)
    }

    fn update(&mut self, resources: &GpuSceneResources, uniforms: &UniformBlock) {
        self.queue
            .write_buffer(&resources.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    fn draw(&mut self, resources: &GpuSceneResources, pass: &mut RenderTarget<'_>) {
        let mut rpass = pass.begin_pass("prism scene pass", None);
        rpass.set_pipeline(&resources.pipeline);
        rpass.set_bind_group(0, &resources.bind_group, &[]);
        rpass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
        rpass.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..resources.index_count, 0, 0..1);
    }

    fn destroy(&mut self, resources: GpuSceneResources) {
        resources.uniform_buffer.destroy();
        resources.vertex_buffer.destroy();
        resources.index_buffer.destroy();
        // Pipeline and bind group are released when dropped here.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::compose;
    use crate::variant::SceneVariant;

    fn noop_device(flavor: PipelineFlavor) -> GpuSceneDevice {
        let (device, queue) = wgpu::Device::noop(&wgpu::DeviceDescriptor::default());
        GpuSceneDevice::new(device, queue, wgpu::TextureFormat::Rgba8UnormSrgb, flavor)
    }

    #[test]
    fn every_scene_builds_on_the_device() {
        let mut dev = noop_device(PipelineFlavor::Rich);
        for v in SceneVariant::SCENES {
            let c = compose(v, PipelineFlavor::Rich).unwrap();
            let res = dev.create(&c.program, &c.mesh).unwrap();
            assert_eq!(res.index_count(), c.mesh.index_count());
            dev.update(&res, &UniformBlock::default());
            dev.destroy(res);
        }
    }

    #[test]
    fn invalid_shader_is_a_construction_error() {
        let mut dev = noop_device(PipelineFlavor::Rich);
        let mut c = compose(SceneVariant::SdfGallery, PipelineFlavor::Rich).unwrap();
        c.program.source.push_str("\nfn broken() -> f32 { return undefined_symbol; }\n");

        let err = dev.create(&c.program, &c.mesh).unwrap_err();
        assert!(matches!(err, SceneError::Construction { variant: SceneVariant::SdfGallery, .. }));

        // The device stays usable after a failed build.
        let ok = compose(SceneVariant::Wave, PipelineFlavor::Rich).unwrap();
        let res = dev.create(&ok.program, &ok.mesh).unwrap();
        dev.destroy(res);
    }

    #[test]
    fn flavor_mismatch_is_rejected() {
        let mut dev = noop_device(PipelineFlavor::Baseline);
        let c = compose(SceneVariant::Wave, PipelineFlavor::Rich).unwrap();
        assert!(dev.create(&c.program, &c.mesh).is_err());
    }
}
