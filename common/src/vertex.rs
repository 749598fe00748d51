/// Anything that can describe its own vertex buffer layout to a pipeline.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}
