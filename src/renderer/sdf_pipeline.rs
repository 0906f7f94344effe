//! SDF-based WebGPU render pipeline
//!
//! Renders the entire scene in fragment shader using signed distance fields.
//! Scene data lives in uniform buffers so the same pipeline runs on WebGL2.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::*;
use crate::error::StartupError;
use crate::sim::GameState;

use super::camera::FollowCamera;

/// Maximum objects of each kind uploaded per frame (must match shader)
pub const MAX_OBJECTS: usize = 64;

/// Extra world units around the view that still count as visible
const CULL_MARGIN: f32 = 2.0;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    resolution: [f32; 2], // offset 0
    time: f32,            // offset 8
    back_scale: f32,      // offset 12 - perspective scale of platform back edges
    camera: [f32; 4],     // offset 16 - x, y, half_height, aspect
    player: [f32; 4],     // offset 32 - x, y, half_size, grounded
    counts: [u32; 4],     // offset 48 - platforms, coins, hazards, unused
}

/// Per-frame object arrays, one vec4 per object
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneData {
    platforms: [[f32; 4]; MAX_OBJECTS], // x, center y, half_width, height
    coins: [[f32; 4]; MAX_OBJECTS],     // x, y, radius, spin phase
    hazards: [[f32; 4]; MAX_OBJECTS],   // x, y, radius, phase
}

/// Visible object counts plus how many were dropped for lack of room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneCounts {
    pub platforms: u32,
    pub coins: u32,
    pub hazards: u32,
    pub overflow: usize,
}

/// Copy up to `MAX_OBJECTS` visible items into `slots`
fn fill_slots<T>(
    slots: &mut [[f32; 4]; MAX_OBJECTS],
    items: &[T],
    visible: impl Fn(&T) -> bool,
    encode: impl Fn(&T) -> [f32; 4],
) -> (u32, usize) {
    let mut count = 0;
    let mut overflow = 0;
    for item in items.iter().filter(|item| visible(item)) {
        if count < MAX_OBJECTS {
            slots[count] = encode(item);
            count += 1;
        } else {
            overflow += 1;
        }
    }
    (count as u32, overflow)
}

impl SceneData {
    /// Pack everything the camera can see
    pub fn from_state(state: &GameState, camera: &FollowCamera) -> (Self, SceneCounts) {
        let mut scene = SceneData::zeroed();
        let world = &state.world;

        let (platforms, dropped_platforms) = fill_slots(
            &mut scene.platforms,
            &world.platforms,
            |p| camera.sees_span(p.pos.x - p.half_width(), p.far_edge(), CULL_MARGIN),
            |p| [p.pos.x, p.pos.y, p.half_width(), PLATFORM_HEIGHT],
        );
        let (coins, dropped_coins) = fill_slots(
            &mut scene.coins,
            &world.coins,
            |c| camera.sees_span(c.pos.x, c.pos.x, CULL_MARGIN),
            |c| [c.pos.x, c.pos.y, COIN_RADIUS, c.id as f32 * 0.7],
        );
        let (hazards, dropped_hazards) = fill_slots(
            &mut scene.hazards,
            &world.hazards,
            |h| camera.sees_span(h.pos.x, h.pos.x, CULL_MARGIN),
            |h| [h.pos.x, h.pos.y, HAZARD_RADIUS, h.phase],
        );

        let counts = SceneCounts {
            platforms,
            coins,
            hazards,
            overflow: dropped_platforms + dropped_coins + dropped_hazards,
        };
        (scene, counts)
    }
}

impl Globals {
    pub fn new(
        size: (u32, u32),
        time: f32,
        state: &GameState,
        camera: &FollowCamera,
        counts: &SceneCounts,
    ) -> Self {
        let player = &state.player;
        Self {
            resolution: [size.0 as f32, size.1 as f32],
            time,
            back_scale: camera.depth_scale(-PLATFORM_DEPTH),
            camera: [camera.pos.x, camera.pos.y, camera.half_height(), camera.aspect],
            player: [
                player.pos.x,
                player.pos.y,
                PLAYER_HALF_SIZE,
                if player.grounded { 1.0 } else { 0.0 },
            ],
            counts: [counts.platforms, counts.coins, counts.hazards, 0],
        }
    }
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    scene_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
    /// Whether an overflow warning was already logged
    overflow_logged: bool,
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, StartupError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(StartupError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::info!("Surface config: {}x{}, alpha: {:?}", width, height, alpha_mode);
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene"),
            contents: bytemuck::bytes_of(&SceneData::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: scene_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            scene_buffer,
            bind_group,
            size: (width, height),
            overflow_logged: false,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Update GPU buffers from game state and render
    ///
    /// `time` is seconds since the page loaded; it only drives animation.
    pub fn render(
        &mut self,
        state: &GameState,
        camera: &FollowCamera,
        time: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        let (scene, counts) = SceneData::from_state(state, camera);
        if counts.overflow > 0 && !self.overflow_logged {
            log::warn!(
                "{} visible objects exceed the {} per-kind render limit",
                counts.overflow,
                MAX_OBJECTS
            );
            self.overflow_logged = true;
        }

        let globals = Globals::new(self.size, time, state, camera, &counts);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
