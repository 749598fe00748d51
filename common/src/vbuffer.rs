use wgpu::util::DeviceExt;

pub struct VBuffer {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl VBuffer {
    /// Storage buffer readable from shaders through `bind_group`, rewritable over the queue.
    pub fn new_storage<T: bytemuck::Pod>(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        values: &[T],
        label: &'static str,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(values),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });

        Self { buffer, bind_group }
    }
}
