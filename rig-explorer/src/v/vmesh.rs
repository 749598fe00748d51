use std::sync::Arc;

use bevy_ecs::component::Component;
use common::{vbuffer::VBuffer, vertex::Vertex, vshader::VShader};
use wgpu::util::DeviceExt;

#[derive(Component)]
pub struct VMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_format: wgpu::IndexFormat,
    shader: Arc<VShader>,
    num_indices: u32,
}

impl VMesh {
    pub fn new<V: Vertex + bytemuck::Pod>(
        device: &wgpu::Device,
        verts_data: &[V],
        indices_data: &[u32],
        shader: Arc<VShader>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(verts_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices_data),
            usage: wgpu::BufferUsages::INDEX,
        });

        VMesh {
            vertex_buffer,
            index_buffer,
            num_indices: indices_data.len() as u32,
            shader,
            index_format: wgpu::IndexFormat::Uint32,
        }
    }

    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, bones: &'a VBuffer) {
        // 1.
        self.shader.draw(render_pass);

        render_pass.set_bind_group(0, &bones.bind_group, &[]);

        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);

        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}
