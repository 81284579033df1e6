use crate::camera::Projection;
use crate::shaders;
use arena_kernel::Arena;
use arena_render::RenderView;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use wgpu::util::DeviceExt;

const FLOOR_COLOR: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
const ACTOR_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const WALL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
const FLOOR_THICKNESS: f32 = 0.02;
/// Floor, actor, four walls, with headroom.
const MAX_INSTANCES: u32 = 16;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: [f32; 4]) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
        }
    }
}

/// Instances for one frame, opaque first.
struct SceneInstances {
    instances: Vec<InstanceData>,
    opaque: u32,
}

/// Floor slab and actor (opaque), then the walls (translucent).
fn scene_instances(arena: &Arena) -> SceneInstances {
    let layout = arena.config().layout;
    let mut instances = Vec::with_capacity(2 + arena.walls().len());

    let floor = Mat4::from_scale_rotation_translation(
        Vec3::new(layout.floor_size, FLOOR_THICKNESS, layout.floor_size),
        Quat::IDENTITY,
        Vec3::new(0.0, -FLOOR_THICKNESS / 2.0, 0.0),
    );
    instances.push(InstanceData::new(floor, FLOOR_COLOR));

    let t = arena.actor().transform();
    instances.push(InstanceData::new(
        Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position),
        ACTOR_COLOR,
    ));
    let opaque = instances.len() as u32;

    for wall in arena.walls() {
        let t = wall.transform();
        let model = Mat4::from_scale_rotation_translation(
            t.scale * wall.dimensions(),
            t.rotation,
            t.position,
        );
        instances.push(InstanceData::new(model, WALL_COLOR));
    }

    SceneInstances { instances, opaque }
}

/// Unit cube vertices and indices.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    const FACES: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for normal in FACES {
        let n = Vec3::from(normal);
        // Two in-plane axes, ordered so the winding is counter-clockwise from outside.
        let u = if n.y.abs() > 0.5 { Vec3::X } else { Vec3::Y.cross(n) };
        let v = n.cross(u);
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0_f32, -1.0_f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * 0.5;
            vertices.push(Vertex {
                position: p.to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// wgpu-based arena renderer.
pub struct WgpuRenderer {
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    instance_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let box_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("box_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BOX_SHADER.into()),
        });
        let opaque_pipeline = box_pipeline(
            device,
            &pipeline_layout,
            &box_shader,
            surface_format,
            BoxPass::Opaque,
        );
        let translucent_pipeline = box_pipeline(
            device,
            &pipeline_layout,
            &box_shader,
            surface_format,
            BoxPass::Translucent,
        );

        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: MAX_INSTANCES as u64 * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        tracing::debug!(
            cube_indices = cube_indices.len(),
            "arena renderer initialized"
        );

        Self {
            opaque_pipeline,
            translucent_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count: cube_indices.len() as u32,
            instance_buffer,
            depth_texture: Self::create_depth_texture(device, width, height),
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: floor, actor, then translucent walls.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        arena: &Arena,
        view: &RenderView,
        projection: &Projection,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: projection.view_projection(view).to_cols_array_2d(),
            }),
        );

        let scene = scene_instances(arena);
        let total = (scene.instances.len() as u32).min(MAX_INSTANCES);
        let opaque = scene.opaque.min(total);
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&scene.instances[..total as usize]),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("arena_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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

            pass.set_pipeline(&self.opaque_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..opaque);

            if total > opaque {
                pass.set_pipeline(&self.translucent_pipeline);
                pass.draw_indexed(0..self.cube_index_count, 0, opaque..total);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
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

#[derive(Clone, Copy, PartialEq, Eq)]
enum BoxPass {
    Opaque,
    Translucent,
}

fn depth_state(write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

fn box_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    pass: BoxPass,
) -> wgpu::RenderPipeline {
    let (label, blend, cull) = match pass {
        BoxPass::Opaque => (
            "box_opaque_pipeline",
            wgpu::BlendState::REPLACE,
            Some(wgpu::Face::Back),
        ),
        // Walls are seen from inside the arena: draw both faces.
        BoxPass::Translucent => (
            "box_translucent_pipeline",
            wgpu::BlendState::ALPHA_BLENDING,
            None,
        ),
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_box"),
            compilation_options: Default::default(),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        2 => Float32x4,
                        3 => Float32x4,
                        4 => Float32x4,
                        5 => Float32x4,
                        6 => Float32x4,
                    ],
                },
            ],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_box"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: cull,
            ..Default::default()
        },
        depth_stencil: Some(depth_state(pass == BoxPass::Opaque)),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_is_unit_and_outward_wound() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        for v in &verts {
            for c in v.position {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
        for tri in indices.chunks(3) {
            let a = Vec3::from(verts[tri[0] as usize].position);
            let b = Vec3::from(verts[tri[1] as usize].position);
            let c = Vec3::from(verts[tri[2] as usize].position);
            let n = Vec3::from(verts[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn scene_has_opaque_then_walls() {
        let arena = Arena::default();
        let scene = scene_instances(&arena);
        assert_eq!(scene.opaque, 2);
        assert_eq!(scene.instances.len(), 6);
        // Plain 0x666666 floor slab.
        assert_eq!(scene.instances[0].color, [0.4, 0.4, 0.4, 1.0]);
        assert_eq!(scene.instances[0].model_0[0], 30.0);
        assert_eq!(scene.instances[1].color, ACTOR_COLOR);
        assert!(scene.instances[2..].iter().all(|i| i.color == WALL_COLOR));
        assert!(scene.instances.len() as u32 <= MAX_INSTANCES);
    }

    #[test]
    fn actor_instance_tracks_position() {
        let mut arena = Arena::default();
        arena.place_actor(Vec3::new(4.0, 1.5, -2.0));
        let scene = scene_instances(&arena);
        assert_eq!(scene.instances[1].model_3, [4.0, 1.5, -2.0, 1.0]);
    }
}
