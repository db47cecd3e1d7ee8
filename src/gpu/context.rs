use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wgpu::{Adapter, Device, Instance, Queue, Surface, SurfaceConfiguration};
use winit::window::Window;

use crate::core::Viewport;

use super::driver::{FrameStatus, GraphicsDriver};
use super::error::{GpuDiagnostic, PresentError};
use super::shader::{ShaderSource, FULLSCREEN_VERTEX_COUNT};

/// Error scopes pushed for every call group, outermost first
const SCOPE_FILTERS: [wgpu::ErrorFilter; 3] = [
    wgpu::ErrorFilter::OutOfMemory,
    wgpu::ErrorFilter::Validation,
    wgpu::ErrorFilter::Internal,
];

/// Frame textures must be non-empty and within the device's 2D limit
pub fn check_texture_size(width: u32, height: u32, max_dimension: u32) -> Result<(), PresentError> {
    if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
        return Err(PresentError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Surface settings chosen at startup
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// Fifo waits for vertical refresh on swap
    pub present_mode: wgpu::PresentMode,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}

/// Compiled full-screen program
pub struct WgpuProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

/// Frame texture bound to a program's sampler slot
pub struct WgpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU state for one window: device, queue and the window's surface.
///
/// Created after the window exists and dropped before it. Every GPU call of
/// the presenter goes through this object.
pub struct GraphicsContext {
    window: Arc<Window>,
    device: Device,
    queue: Queue,
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    size: (u32, u32),
    lost: Arc<AtomicBool>,
    pending: Option<wgpu::SurfaceTexture>,
    open_groups: usize,
}

impl GraphicsContext {
    /// Create surface, adapter and device for `window`
    pub async fn new(window: Arc<Window>, options: &ContextOptions) -> Result<Self, PresentError> {
        let inner = window.inner_size();
        let size = (inner.width, inner.height);

        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| PresentError::GraphicsContext(format!("failed to create surface: {}", e)))?;

        let adapter = Self::request_adapter(&instance, &surface).await?;
        let adapter_info = adapter.get_info();
        let (device, queue) = Self::request_device(&adapter).await?;

        let lost = Arc::new(AtomicBool::new(false));
        let lost_flag = lost.clone();
        device.set_device_lost_callback(move |reason, message| {
            log::error!("GPU device lost ({:?}): {}", reason, message);
            lost_flag.store(true, Ordering::SeqCst);
        });

        let caps = surface.get_capabilities(&adapter);
        // Packed colors are display-ready bytes, so skip the sRGB encode
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| {
                PresentError::GraphicsContext("surface reports no supported formats".to_string())
            })?;

        let present_mode = if caps.present_modes.contains(&options.present_mode) {
            options.present_mode
        } else {
            log::warn!(
                "present mode {:?} unsupported, falling back to Fifo",
                options.present_mode
            );
            wgpu::PresentMode::Fifo
        };

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        surface.configure(&device, &config);
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(PresentError::GraphicsContext(format!(
                "failed to configure surface: {}",
                err
            )));
        }

        log::info!("Using {:?} backend", adapter_info.backend);
        log::info!("Renderer used: {}", adapter_info.name);
        log::info!("Driver: {} {}", adapter_info.driver, adapter_info.driver_info);
        log::info!("Surface format: {:?}, present mode: {:?}", format, present_mode);

        Ok(Self {
            window,
            device,
            queue,
            surface,
            config,
            size,
            lost,
            pending: None,
            open_groups: 0,
        })
    }

    /// Reconfigure the surface for a new window size.
    /// A zero extent only records the size; frames are skipped until it grows.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.surface.configure(&self.device, &self.config);
        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            log::warn!("failed to reconfigure surface to {}x{}: {}", width, height, err);
        }
    }

    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter, PresentError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PresentError::GraphicsContext(format!("no compatible adapter: {}", e)))
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue), PresentError> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Presenter Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| PresentError::GraphicsContext(format!("failed to create device: {}", e)))
    }

    fn create_bind_group_layout(&self) -> wgpu::BindGroupLayout {
        self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Texture Bind Group Layout"),
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
        })
    }

    fn create_sampler(&self) -> wgpu::Sampler {
        // Nearest keeps arcade pixels crisp at any scale
        self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Texture Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }
}

impl GraphicsDriver for GraphicsContext {
    type Program = WgpuProgram;
    type Texture = WgpuTexture;

    fn check_context(&self) -> Result<(), PresentError> {
        if self.lost.load(Ordering::SeqCst) {
            return Err(PresentError::GraphicsContext("device lost".to_string()));
        }
        Ok(())
    }

    fn compile_program(&mut self, source: &ShaderSource) -> Result<WgpuProgram, PresentError> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.wgsl.clone()),
        });
        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(PresentError::ShaderCompile {
                label: source.label.to_string(),
                log: err.to_string(),
            });
        }

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let bind_group_layout = self.create_bind_group_layout();

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fullscreen Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(source.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(source.vertex_entry),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(source.fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
            multiview: None,
            cache: None,
        });
        let sampler = self.create_sampler();

        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(PresentError::ShaderLink {
                label: source.label.to_string(),
                log: err.to_string(),
            });
        }

        Ok(WgpuProgram {
            pipeline,
            bind_group_layout,
            sampler,
        })
    }

    fn create_texture(
        &mut self,
        program: &WgpuProgram,
        width: u32,
        height: u32,
    ) -> Result<WgpuTexture, PresentError> {
        check_texture_size(width, height, self.device.limits().max_texture_dimension_2d)?;

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Texture Bind Group"),
            layout: &program.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&program.sampler),
                },
            ],
        });

        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            texture.destroy();
            return Err(PresentError::GraphicsContext(format!(
                "failed to create {}x{} frame texture: {}",
                width, height, err
            )));
        }

        Ok(WgpuTexture { texture, bind_group })
    }

    fn upload_texture(&mut self, texture: &WgpuTexture, texels: &[u8], width: u32, height: u32) {
        self.queue.write_texture(
            texture.texture.as_image_copy(),
            texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn draw_fullscreen(
        &mut self,
        program: &WgpuProgram,
        texture: &WgpuTexture,
        viewport: Viewport,
    ) -> Result<FrameStatus, PresentError> {
        self.check_context()?;
        if self.size.0 == 0 || self.size.1 == 0 {
            return Ok(FrameStatus::Skipped);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(PresentError::OutOfMemory),
            Err(err) => {
                log::warn!("skipping frame: {}", err);
                return Ok(FrameStatus::Skipped);
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
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
            });

            render_pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
            render_pass.set_pipeline(&program.pipeline);
            render_pass.set_bind_group(0, &texture.bind_group, &[]);
            render_pass.draw(0..FULLSCREEN_VERTEX_COUNT, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));
        self.pending = Some(frame);

        Ok(FrameStatus::Drawn)
    }

    fn swap(&mut self) {
        if let Some(frame) = self.pending.take() {
            self.window.pre_present_notify();
            frame.present();
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn begin_group(&mut self) {
        for filter in SCOPE_FILTERS {
            self.device.push_error_scope(filter);
        }
        self.open_groups += 1;
    }

    fn drain_errors(&mut self) -> Vec<GpuDiagnostic> {
        if self.open_groups == 0 {
            return Vec::new();
        }
        self.open_groups -= 1;

        SCOPE_FILTERS
            .iter()
            .filter_map(|_| pollster::block_on(self.device.pop_error_scope()))
            .map(GpuDiagnostic::from)
            .collect()
    }

    fn release_texture(&mut self, texture: WgpuTexture) {
        texture.texture.destroy();
    }

    fn release_program(&mut self, program: WgpuProgram) {
        drop(program);
    }
}
