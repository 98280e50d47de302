use std::sync::Arc;
use wgpu::{Device, Instance, Queue, Surface, SurfaceConfiguration, TextureFormat};
use winit::window::Window;

use crate::error::GpuError;

/// GPU context holding the device, queue and window surface
pub struct GpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
}

impl GpuContext {
    /// Create a new GPU context presenting to the given window
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        // Only a texture blit and the UI are drawn
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        log::info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("two-truths-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let capabilities = surface.get_capabilities(&adapter);
        let format = surface_format(&capabilities.formats).ok_or(GpuError::UnsupportedSurface)?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        log::info!("Surface format {:?}, frame texture {:?}", format, frame_texture_format(format));

        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Handle window resize; zero-sized surfaces are left unconfigured
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) -> bool {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            true
        } else {
            false
        }
    }

    /// Get current surface texture format
    pub fn format(&self) -> TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels
    pub fn size_in_pixels(&self) -> [u32; 2] {
        [self.config.width, self.config.height]
    }
}

/// Pick the surface format: a plain 8-bit RGBA/BGRA format if offered
/// (the UI renderer blends in gamma space), otherwise whatever comes first
pub fn surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| matches!(f, TextureFormat::Rgba8Unorm | TextureFormat::Bgra8Unorm))
        .or_else(|| formats.first().copied())
}

/// Format for the CPU frame texture so its sRGB bytes reach the surface
/// unchanged: decoded and re-encoded on sRGB surfaces, passed through otherwise
pub fn frame_texture_format(surface: TextureFormat) -> TextureFormat {
    if surface.is_srgb() {
        TextureFormat::Rgba8UnormSrgb
    } else {
        TextureFormat::Rgba8Unorm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_plain_eight_bit_format() {
        let offered = [
            TextureFormat::Bgra8UnormSrgb,
            TextureFormat::Rgba16Float,
            TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(surface_format(&offered), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let offered = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba16Float];
        assert_eq!(surface_format(&offered), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(surface_format(&[]), None);
    }

    #[test]
    fn test_frame_texture_matches_surface_encoding() {
        assert_eq!(
            frame_texture_format(TextureFormat::Bgra8UnormSrgb),
            TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            frame_texture_format(TextureFormat::Bgra8Unorm),
            TextureFormat::Rgba8Unorm
        );
    }
}
