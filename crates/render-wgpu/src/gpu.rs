use std::collections::HashMap;

use glam::Mat4;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use rollfield_common::SceneConfig;
use rollfield_scene::Scene;
use rollfield_terrain::{StreamDelta, TerrainStreamer, TileCoord};

use crate::mesh::{Vertex, sphere_mesh};
use crate::shaders;
use crate::texture::upload_texture;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
}

/// GPU-side buffers for one live tile. Dropped when the tile is removed.
struct GpuTile {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// wgpu renderer for the rolling-sphere scene.
///
/// One pipeline serves both tiles and sphere: per-draw mvp uniform at group
/// 0, sampled texture at group 1. Tile vertices are baked into world space
/// at upload, so the tile draw uses the view-projection alone; the sphere
/// composes its model matrix from the actor transform each frame.
pub struct WgpuSceneRenderer {
    pipeline: wgpu::RenderPipeline,
    tile_uniform_buffer: wgpu::Buffer,
    tile_uniform_bind_group: wgpu::BindGroup,
    sphere_uniform_buffer: wgpu::Buffer,
    sphere_uniform_bind_group: wgpu::BindGroup,
    grid_texture_bind_group: wgpu::BindGroup,
    sphere_texture_bind_group: wgpu::BindGroup,
    sphere_vertex_buffer: wgpu::Buffer,
    sphere_index_buffer: wgpu::Buffer,
    sphere_index_count: u32,
    tile_buffers: HashMap<TileCoord, GpuTile>,
    depth_texture: wgpu::TextureView,
    background: wgpu::Color,
}

impl WgpuSceneRenderer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &SceneConfig,
        grid_image: &RgbaImage,
        sphere_image: &RgbaImage,
    ) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let make_uniform = |label: &str| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&Uniforms {
                    mvp: Mat4::IDENTITY.to_cols_array_2d(),
                }),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            (buffer, bind_group)
        };
        let (tile_uniform_buffer, tile_uniform_bind_group) = make_uniform("tile_uniform");
        let (sphere_uniform_buffer, sphere_uniform_bind_group) = make_uniform("sphere_uniform");

        // Grid texture wraps so the pattern repeats across each tile.
        let grid_view = upload_texture(device, queue, grid_image, "grid_texture");
        let grid_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("grid_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let sphere_view = upload_texture(device, queue, sphere_image, "sphere_texture");
        let sphere_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sphere_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let make_texture_bg = |label: &str, view: &wgpu::TextureView, sampler: &wgpu::Sampler| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        let grid_texture_bind_group = make_texture_bg("grid_texture_bg", &grid_view, &grid_sampler);
        let sphere_texture_bind_group =
            make_texture_bg("sphere_texture_bg", &sphere_view, &sphere_sampler);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Tiles are viewed from both sides near the horizon edge.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (sphere_verts, sphere_indices) = sphere_mesh(config.sphere_radius);
        let sphere_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_vertex_buffer"),
            contents: bytemuck::cast_slice(&sphere_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_index_buffer"),
            contents: bytemuck::cast_slice(&sphere_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let [r, g, b, a] = config.background_color;
        let background = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            tile_uniform_buffer,
            tile_uniform_bind_group,
            sphere_uniform_buffer,
            sphere_uniform_bind_group,
            grid_texture_bind_group,
            sphere_texture_bind_group,
            sphere_vertex_buffer,
            sphere_index_buffer,
            sphere_index_count: sphere_indices.len() as u32,
            tile_buffers: HashMap::new(),
            depth_texture,
            background,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Mirror the streamer's tile lifecycle onto GPU buffers.
    ///
    /// After this call the buffer map holds exactly the streamer's live set.
    pub fn sync_tiles(
        &mut self,
        device: &wgpu::Device,
        terrain: &TerrainStreamer,
        delta: &StreamDelta,
    ) {
        for coord in &delta.removed {
            self.tile_buffers.remove(coord);
        }

        for coord in &delta.created {
            let Some(tile) = terrain.tile(*coord) else {
                continue;
            };
            let center = coord.world_center(terrain.tile_size());
            let vertices: Vec<Vertex> = tile
                .mesh()
                .vertices
                .iter()
                .map(|v| Vertex {
                    position: [
                        v.position[0] + center.x,
                        v.position[1],
                        v.position[2] + center.z,
                    ],
                    normal: v.normal,
                    uv: v.uv,
                })
                .collect();

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("tile_{}_{}_vb", coord.x, coord.z)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("tile_{}_{}_ib", coord.x, coord.z)),
                contents: bytemuck::cast_slice(&tile.mesh().indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.tile_buffers.insert(
                *coord,
                GpuTile {
                    vertex_buffer,
                    index_buffer,
                    index_count: tile.mesh().indices.len() as u32,
                },
            );
        }

        debug_assert_eq!(self.tile_buffers.len(), terrain.live_count());
    }

    /// Render one frame: ground tiles, then the sphere.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let view_proj = scene.camera.view_projection();
        queue.write_buffer(
            &self.tile_uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                mvp: view_proj.to_cols_array_2d(),
            }),
        );

        let t = scene.sphere.transform();
        let model = Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position);
        queue.write_buffer(
            &self.sphere_uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                mvp: (view_proj * model).to_cols_array_2d(),
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);

            // Ground tiles
            pass.set_bind_group(0, &self.tile_uniform_bind_group, &[]);
            pass.set_bind_group(1, &self.grid_texture_bind_group, &[]);
            for tile in self.tile_buffers.values() {
                pass.set_vertex_buffer(0, tile.vertex_buffer.slice(..));
                pass.set_index_buffer(tile.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..tile.index_count, 0, 0..1);
            }

            // Sphere
            pass.set_bind_group(0, &self.sphere_uniform_bind_group, &[]);
            pass.set_bind_group(1, &self.sphere_texture_bind_group, &[]);
            pass.set_vertex_buffer(0, self.sphere_vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.sphere_index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..self.sphere_index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Number of tiles with live GPU buffers.
    pub fn gpu_tile_count(&self) -> usize {
        self.tile_buffers.len()
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
