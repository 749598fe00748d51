use crate::{vertex::Vertex, vinstance::StateInstance};

pub struct VShader {
    render_pipeline: wgpu::RenderPipeline,
}

impl VShader {
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.render_pipeline);
    }

    /// Linear-blend skinning with a flat unlit output. Rig exports carry no
    /// winding guarantees, so nothing is culled.
    pub fn new_skinned<V: Vertex>(renderer: &StateInstance) -> Self {
        let shader = renderer
            .device
            .create_shader_module(wgpu::include_wgsl!("skinned_shader.wgsl"));
        Self::new::<V>(
            renderer,
            shader,
            wgpu::PrimitiveTopology::TriangleList,
            None,
            "Skinned",
        )
    }

    pub fn new<V: Vertex>(
        renderer: &StateInstance,
        shader: wgpu::ShaderModule,
        topology: wgpu::PrimitiveTopology,
        cull_mode: Option<wgpu::Face>,
        name: &str,
    ) -> Self {
        let bind_group_layouts = [&renderer.bones_bind_group_layout];

        let render_pipeline_layout =
            renderer
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(name),
                    bind_group_layouts: &bind_group_layouts[..],
                    push_constant_ranges: &[],
                });

        let render_pipeline =
            renderer
                .device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(name),
                    layout: Some(&render_pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: "vs_main", // 1.
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                        buffers: &[<V>::desc()],
                    },
                    fragment: Some(wgpu::FragmentState {
                        // 3.
                        module: &shader,
                        entry_point: "fs_main",
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            // 4.
                            format: renderer.format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology, // 1.
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw, // 2.
                        cull_mode,
                        // Setting this to anything other than Fill requires Features::NON_FILL_POLYGON_MODE
                        polygon_mode: wgpu::PolygonMode::Fill,
                        // Requires Features::DEPTH_CLIP_CONTROL
                        unclipped_depth: false,
                        // Requires Features::CONSERVATIVE_RASTERIZATION
                        conservative: false,
                    },
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState {
                        count: 1,                         // 2.
                        mask: !0,                         // 3.
                        alpha_to_coverage_enabled: false, // 4.
                    },
                    multiview: None, // 5.
                });
        Self { render_pipeline }
    }
}
