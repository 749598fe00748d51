use std::sync::Arc;

use anyhow::Context;
use bevy_ecs::system::{Commands, NonSend, Query, Res};
use common::vinstance::StateInstance;

use crate::{loader::BoneBuffer, playback::Playback, state::SurfaceFailure};

use super::VMesh;

pub struct VRenderer {
    pub instance: Arc<StateInstance>,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    window: Arc<winit::window::Window>,
}

pub fn draw_skinned(
    meshes: Query<&VMesh>,
    renderer: NonSend<VRenderer>,
    playback_opt: Option<Res<Playback>>,
    bones_opt: Option<Res<BoneBuffer>>,
    mut commands: Commands,
) {
    let output = match renderer.surface().get_current_texture() {
        Ok(output) => output,
        Err(e) => {
            // Hand the failure to the event loop, which knows whether to
            // reconfigure or quit.
            commands.insert_resource(SurfaceFailure(e));
            return;
        }
    };

    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = renderer
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    // The palette buffer was sized at startup; every frame just rewrites it
    // with the pose the cursor landed on.
    if let (Some(playback), Some(bones)) = (&playback_opt, &bones_opt) {
        renderer.queue().write_buffer(
            &bones.buffer.buffer,
            0,
            bytemuck::cast_slice(playback.animator.current_bone_matrices()),
        );
    }

    {
        let mut render_pass: wgpu::RenderPass<'_> =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[
                    // This is what @location(0) in the fragment shader targets
                    Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                            store: wgpu::StoreOp::Store,
                        },
                    }),
                ],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        if let Some(bones) = &bones_opt {
            for mesh in meshes.iter() {
                mesh.draw(&mut render_pass, &bones.buffer);
            }
        }
    }

    // submit will accept anything that implements IntoIter
    renderer.queue().submit(std::iter::once(encoder.finish()));
    output.present();
}

impl VRenderer {
    /// Creating some of the wgpu types requires async code
    /// https://sotrh.github.io/learn-wgpu/beginner/tutorial2-surface/#state-new
    pub async fn new(window: winit::window::Window) -> anyhow::Result<Self> {
        let window = Arc::new(window);
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // Backends::all => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // The window Arc keeps the surface's target alive for as long as the
        // renderer exists.
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None, // Trace path
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Shader code in this tutorial assumes an sRGB surface texture. Using a different
        // one will result all the colors coming out darker. If you want to support non
        // sRGB surfaces, you'll need to account for that when drawing to the frame.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bones_bind_group_layout: wgpu::BindGroupLayout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("bones_bind_group_layout"),
            });

        Ok(Self {
            window,
            instance: Arc::new(StateInstance {
                surface,
                device,
                queue,
                format: config.format,
                bones_bind_group_layout,
            }),
            config,
            size,
        })
    }

    pub fn window(&self) -> &Arc<winit::window::Window> {
        &self.window
    }
    pub fn surface(&self) -> &wgpu::Surface<'static> {
        &self.instance.surface
    }
    pub fn device(&self) -> &wgpu::Device {
        &self.instance.device
    }
    pub fn queue(&self) -> &wgpu::Queue {
        &self.instance.queue
    }
    pub fn config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }

    pub fn instance(&self) -> Arc<StateInstance> {
        self.instance.clone()
    }
}
