use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use rollfield_common::SceneConfig;
use rollfield_input::{ArrowKey, KeyState};
use rollfield_render_wgpu::{WgpuSceneRenderer, load_texture_or_fallback};
use rollfield_scene::Scene;
use rollfield_terrain::TerrainStreamer;

#[derive(Parser)]
#[command(name = "rollfield-desktop", about = "Rolling-sphere scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory containing grid.png and colors.png
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,
}

/// Map a physical key to an arrow key. Everything else is ignored.
fn map_key(key: KeyCode) -> Option<ArrowKey> {
    match key {
        KeyCode::ArrowUp => Some(ArrowKey::Up),
        KeyCode::ArrowDown => Some(ArrowKey::Down),
        KeyCode::ArrowLeft => Some(ArrowKey::Left),
        KeyCode::ArrowRight => Some(ArrowKey::Right),
        _ => None,
    }
}

/// Application state: the explicit context every frame update works on.
struct AppState {
    config: SceneConfig,
    keys: KeyState,
    scene: Scene,
    terrain: TerrainStreamer,
}

impl AppState {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            keys: KeyState::new(config.move_speed),
            scene: Scene::new(config),
            terrain: TerrainStreamer::new(config.tile_size, config.view_radius),
        }
    }

    /// One frame of simulation: integrate movement, follow with the camera,
    /// reconcile the tile window. Render submission follows in the caller.
    fn update(&mut self) -> rollfield_terrain::StreamDelta {
        self.scene.tick(self.keys.movement().as_vec3());
        self.terrain.update(self.scene.camera.eye())
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(arrow) = map_key(key) {
            self.keys.set(arrow, pressed);
        }
    }
}

struct GpuApp {
    state: AppState,
    assets_dir: PathBuf,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuSceneRenderer>,
}

impl GpuApp {
    fn new(scene_config: SceneConfig, assets_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(scene_config),
            assets_dir,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Rollfield")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("rollfield_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.scene.camera.aspect = size.width as f32 / size.height.max(1) as f32;

        // Asset loads are tolerated-fail: a bad file gets a placeholder.
        let grid_image = load_texture_or_fallback(self.assets_dir.join("grid.png"));
        let sphere_image = load_texture_or_fallback(self.assets_dir.join("colors.png"));

        let renderer = WgpuSceneRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &self.state.config,
            &grid_image,
            &sphere_image,
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.scene.camera.aspect =
                        config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let delta = self.state.update();

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                if let Some(renderer) = &mut self.renderer {
                    renderer.sync_tiles(device, &self.state.terrain, &delta);
                }

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &self.state.scene);
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("rollfield-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(SceneConfig::default(), cli.assets_dir);
    event_loop.run_app(&mut app)?;

    Ok(())
}
