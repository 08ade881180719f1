//! The graphics device and back buffer.

use std::sync::Arc;

use crate::error::{RenderError, RenderResult};

/// A surface texture acquired for one frame.
pub struct FrameTarget {
    output: wgpu::SurfaceTexture,
    /// View of the swapchain image.
    pub view: wgpu::TextureView,
}

impl FrameTarget {
    /// Schedules the frame for presentation.
    pub fn present(self) {
        self.output.present();
    }
}

/// The rendering engine backed by wgpu.
///
/// Owns the device, the window surface and, when multisampling is active, the
/// multisampled color target that resolves into the swapchain image.
pub struct RenderEngine {
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    /// Current width in physical pixels.
    pub width: u32,
    /// Current height in physical pixels.
    pub height: u32,
    msaa_samples: u32,
    msaa_view: Option<wgpu::TextureView>,
}

impl RenderEngine {
    /// Creates a render engine for `window`.
    ///
    /// `requested_msaa` is a preference: when the adapter cannot multisample
    /// the surface format at that count, rendering falls back to 1 sample.
    pub async fn new_windowed(
        window: Arc<winit::window::Window>,
        requested_msaa: u32,
    ) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("guihost device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // egui blends in gamma space, so a plain unorm swapchain is preferred
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::SurfaceConfigurationFailed)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let format_features = adapter.get_texture_format_features(surface_format);
        let msaa_samples = if requested_msaa <= 1 {
            1
        } else if format_features.flags.sample_count_supported(requested_msaa) {
            requested_msaa
        } else {
            log::warn!(
                "{requested_msaa}x multisampling unsupported for {surface_format:?}, disabling"
            );
            1
        };

        let msaa_view =
            Self::create_msaa_view(&device, surface_format, width, height, msaa_samples);

        log::info!("surface {width}x{height} {surface_format:?}, {msaa_samples}x MSAA");

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            width,
            height,
            msaa_samples,
            msaa_view,
        })
    }

    /// The swapchain texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Sample count of the color target.
    pub fn msaa_samples(&self) -> u32 {
        self.msaa_samples
    }

    /// Resizes the surface and multisample target. Zero sizes (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);

        self.msaa_view = Self::create_msaa_view(
            &self.device,
            self.surface_config.format,
            width,
            height,
            self.msaa_samples,
        );
    }

    /// Acquires the next swapchain image.
    ///
    /// Returns `Ok(None)` when the frame should be skipped (surface lost,
    /// outdated or timed out); the surface is reconfigured where needed.
    pub fn acquire_frame(&mut self) -> RenderResult<Option<FrameTarget>> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.width, self.height);
                return Ok(None);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                return Err(RenderError::OutOfMemory);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return Ok(None);
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return Ok(None);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Some(FrameTarget { output, view }))
    }

    /// Color attachment that clears to `clear_color` and ends up in `frame`.
    ///
    /// With multisampling the pass draws into the multisample target and
    /// resolves into the swapchain image.
    pub fn color_attachment<'a>(
        &'a self,
        frame: &'a FrameTarget,
        clear_color: [f32; 3],
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&frame.view)),
            None => (&frame.view, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear_color_for(self.format(), clear_color)),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        }
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa color texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}

/// Converts an sRGB-encoded color to the clear value for `format`.
///
/// sRGB swapchains expect linear clear values; unorm swapchains take the
/// encoded values as they are.
pub fn clear_color_for(format: wgpu::TextureFormat, rgb: [f32; 3]) -> wgpu::Color {
    let channel = |c: f32| {
        let c = f64::from(c.clamp(0.0, 1.0));
        if format.is_srgb() {
            srgb_to_linear(c)
        } else {
            c
        }
    };
    wgpu::Color {
        r: channel(rgb[0]),
        g: channel(rgb[1]),
        b: channel(rgb[2]),
        a: 1.0,
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
