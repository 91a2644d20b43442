//! Core application state and lifecycle.

use kurbo::Point;
use pixelink_core::canvas::Canvas;
use pixelink_core::color::PixelColor;
use pixelink_core::history::{History, MAX_UNDO_HISTORY};
use pixelink_core::input::{KeyEvent, Modifiers, PointerEvent};
use pixelink_core::layout::{CELL_SIZE, Layout, SIDEBAR_WIDTH};
use pixelink_core::router::{InputRouter, RouteOutcome};
use pixelink_core::shortcuts::ShortcutRegistry;
use pixelink_core::storage::{self, DEFAULT_IMAGE_PATH, StorageError};
use pixelink_render::{PngRenderResult, RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState};
use winit::window::{Window, WindowId};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Render a scene offscreen and read the pixels back.
fn render_scene_to_png(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    scene: &Scene,
    base_color: peniko::Color,
    width: u32,
    height: u32,
) -> RenderResult<PngRenderResult> {
    if width == 0 || height == 0 {
        return Err(RendererError::RenderFailed("empty surface".to_string()));
    }

    let texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("png export texture"),
        size: vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: vello::wgpu::TextureUsages::STORAGE_BINDING
            | vello::wgpu::TextureUsages::COPY_SRC
            | vello::wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    let texture_view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };

    vello_renderer
        .render_to_texture(device, queue, scene, &texture_view, &params)
        .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

    let bytes_per_row = (width * 4).next_multiple_of(256); // wgpu alignment requirement
    let buffer_size = (bytes_per_row * height) as u64;

    let readback_buffer = device.create_buffer(&vello::wgpu::BufferDescriptor {
        label: Some("png readback buffer"),
        size: buffer_size,
        usage: vello::wgpu::BufferUsages::COPY_DST | vello::wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
        label: Some("png copy encoder"),
    });

    encoder.copy_texture_to_buffer(
        vello::wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: vello::wgpu::Origin3d::ZERO,
            aspect: vello::wgpu::TextureAspect::All,
        },
        vello::wgpu::TexelCopyBufferInfo {
            buffer: &readback_buffer,
            layout: vello::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = readback_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(vello::wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });

    // Blocks until the GPU is done
    let _ = device.poll(vello::wgpu::PollType::wait_indefinitely());

    match rx.recv() {
        Ok(Ok(())) => {}
        _ => {
            return Err(RendererError::RenderFailed(
                "failed to map readback buffer".to_string(),
            ));
        }
    }

    let data = buffer_slice.get_mapped_range();

    // Strip row padding
    let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        let row_start = (row * bytes_per_row) as usize;
        let row_end = row_start + (width * 4) as usize;
        rgba_data.extend_from_slice(&data[row_start..row_end]);
    }

    drop(data);
    readback_buffer.unmap();

    Ok(PngRenderResult {
        rgba_data,
        width,
        height,
    })
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Side length of a cell in physical pixels.
    pub cell_size: u32,
    /// Width of the palette/brush sidebar in physical pixels.
    pub sidebar_width: u32,
    /// File written by Ctrl+S and read by Ctrl+L.
    pub image_path: PathBuf,
    /// Maximum snapshots kept on each of the undo and redo stacks.
    pub history_limit: usize,
    pub background_color: PixelColor,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Pixel Art Editor".to_string(),
            width: 1000,
            height: 600,
            cell_size: CELL_SIZE,
            sidebar_width: SIDEBAR_WIDTH,
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            history_limit: MAX_UNDO_HISTORY,
            background_color: PixelColor::WHITE,
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    scene_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    canvas: Canvas,
    router: InputRouter,
    config: AppConfig,
}

impl AppState {
    /// Build the vello scene for the current canvas and window.
    fn build_scene(&mut self) -> Scene {
        let ctx = RenderContext::new(&self.canvas, *self.router.layout());
        self.scene_renderer.build_scene(&ctx);
        self.scene_renderer.take_scene()
    }

    fn base_color(&self) -> peniko::Color {
        self.config.background_color.into()
    }

    /// Render the full window offscreen and write it to the image path.
    fn save_image(&mut self, render_cx: &vello::util::RenderContext) -> Result<(), AppError> {
        let scene = self.build_scene();
        let base_color = self.base_color();
        let device_handle = &render_cx.devices[self.surface.dev_id];
        let result = render_scene_to_png(
            &device_handle.device,
            &device_handle.queue,
            &mut self.vello_renderer,
            &scene,
            base_color,
            self.surface.config.width,
            self.surface.config.height,
        )?;
        storage::save_png(&self.config.image_path, &result.rgba_data, result.width, result.height)?;
        log::info!("Artwork saved as {}", self.config.image_path.display());
        Ok(())
    }

    /// Repopulate the grid from the saved image, one sample per cell.
    fn load_image(&mut self) -> Result<(), AppError> {
        let image = storage::load_png(&self.config.image_path)?;
        let cell_size = self.router.layout().cell_size;
        self.canvas.sample_from(&image, cell_size);
        log::info!("Artwork loaded from {}", self.config.image_path.display());
        Ok(())
    }

    /// Draw one frame to the window surface.
    fn render_frame(&mut self, render_cx: &vello::util::RenderContext) {
        let scene = self.build_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match self.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color: self.base_color(),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello needs a StorageBinding Rgba8Unorm target; the surface may be
        // Bgra8Unorm, so render to an intermediate texture and blit.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) =
            self.vello_renderer
                .render_to_texture(device, queue, &scene, &render_texture_view, &params)
        {
            log::error!("Failed to render: {:?}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        self.texture_blitter
            .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    /// Finish initialization after surface is created.
    fn finish_init(
        &mut self,
        window: Arc<Window>,
        surface: RenderSurface<'static>,
    ) -> Result<(), RendererError> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| RendererError::InitFailed("render context missing".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{:?}", e)))?;

        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let layout = Layout::with_metrics(
            surface.config.width,
            surface.config.height,
            self.config.cell_size,
            self.config.sidebar_width,
        );
        let (cols, rows) = layout.grid_dimensions();
        let canvas = Canvas::with_history(cols, rows, History::with_limit(self.config.history_limit))
            .with_background(self.config.background_color);

        log::info!(
            "PixelInk initialized - {}x{} window, {}x{} cells",
            surface.config.width,
            surface.config.height,
            cols,
            rows
        );
        ShortcutRegistry::print_all();

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            scene_renderer: VelloRenderer::new(),
            texture_blitter,
            canvas,
            router: InputRouter::new(layout),
            config: self.config.clone(),
        });

        window.request_redraw();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

fn convert_button(button: MouseButton) -> Option<pixelink_core::input::MouseButton> {
    match button {
        MouseButton::Left => Some(pixelink_core::input::MouseButton::Left),
        MouseButton::Right => Some(pixelink_core::input::MouseButton::Right),
        MouseButton::Middle => Some(pixelink_core::input::MouseButton::Middle),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(true);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface = match pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        )) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {:?}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.finish_init(window, surface) {
            log::error!("{}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let outcome = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => {
                let outcome = state.router.handle_resize(&mut state.canvas, size.width, size.height);
                if size.width > 0 && size.height > 0 {
                    if let Some(render_cx) = self.render_cx.as_mut() {
                        render_cx.resize_surface(&mut state.surface, size.width, size.height);
                    }
                    state.window.request_redraw();
                }
                outcome
            }

            WindowEvent::RedrawRequested => {
                if let Some(render_cx) = self.render_cx.as_ref() {
                    state.render_frame(render_cx);
                }
                state.window.request_redraw();
                return;
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.router.set_modifiers(convert_modifiers(modifiers.state()));
                return;
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Point::new(position.x, position.y);
                state
                    .router
                    .handle_pointer(&mut state.canvas, PointerEvent::Move { position })
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let Some(button) = convert_button(button) else {
                    return;
                };
                let position = state.router.pointer_position();
                let event = match btn_state {
                    ElementState::Pressed => PointerEvent::Down { position, button },
                    ElementState::Released => PointerEvent::Up { position, button },
                };
                state.router.handle_pointer(&mut state.canvas, event)
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                let Key::Character(c) = &event.logical_key else {
                    return;
                };
                let key = c.to_lowercase();
                let event = match event.state {
                    ElementState::Pressed => KeyEvent::Pressed(key),
                    ElementState::Released => KeyEvent::Released(key),
                };
                state.router.handle_key(&mut state.canvas, event)
            }

            _ => return,
        };

        match outcome {
            RouteOutcome::Ignored => {}
            RouteOutcome::Changed => state.window.request_redraw(),
            RouteOutcome::SaveRequested => {
                if let Some(render_cx) = self.render_cx.as_ref() {
                    if let Err(e) = state.save_image(render_cx) {
                        log::error!("Failed to save artwork: {}", e);
                    }
                }
            }
            RouteOutcome::LoadRequested => match state.load_image() {
                Ok(()) => state.window.request_redraw(),
                Err(AppError::Storage(StorageError::NotFound(path))) => {
                    log::info!("No saved artwork at {}", path);
                }
                Err(e) => log::error!("Failed to load artwork: {}", e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (1000, 600));
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.sidebar_width, 200);
        assert_eq!(config.image_path, PathBuf::from("pixel_art.png"));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_convert_modifiers() {
        let mods = convert_modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(mods.ctrl);
        assert!(mods.shift);
        assert!(!mods.meta);
        assert!(mods.command());

        let mods = convert_modifiers(ModifiersState::SUPER);
        assert!(mods.meta && mods.command());
    }

    #[test]
    fn test_convert_button() {
        assert_eq!(
            convert_button(MouseButton::Left),
            Some(pixelink_core::input::MouseButton::Left)
        );
        assert_eq!(convert_button(MouseButton::Back), None);
    }
}
