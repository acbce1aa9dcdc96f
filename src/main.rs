//! Vibesphere - A sphere that listens
//!
//! Speak and the sphere swells, ripples, spins faster and glows;
//! fall silent and it settles back into a calm cyan ball.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{error, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vibesphere::audio::{AudioInput, FrequencySource};
use vibesphere::camera::CameraSystem;
use vibesphere::cli::Args;
use vibesphere::params::Config;
use vibesphere::rendering::{RenderSystem, Uniforms};
use vibesphere::sphere::SphereSystem;

const WINDOW_TITLE: &str = "Vibesphere";

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    sphere: SphereSystem,
    camera: CameraSystem,

    // Audio (requested once, on first resume)
    audio_input: Option<Box<dyn AudioInput>>,
    audio: Option<Box<dyn FrequencySource>>,
    bins: Vec<u8>,

    // Configuration
    config: Config,

    // Time tracking
    start_time: Instant,

    /// Fatal setup error reported after the event loop exits
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, audio_input: Option<Box<dyn AudioInput>>) -> Self {
        let sphere = SphereSystem::new(config.level.clone(), config.shape.clone());
        let camera = CameraSystem::new(&config.render);

        Self {
            window: None,
            render_system: None,
            sphere,
            camera,
            audio_input,
            audio: None,
            bins: Vec::new(),
            config,
            start_time: Instant::now(),
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.render.window_width,
                self.config.render.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.sphere.mesh,
            &self.config.render,
        ))?;

        let (width, height) = render_system.size();
        self.camera.resize(width, height);

        // Request audio once; failure leaves the sphere idling
        if let Some(mut input) = self.audio_input.take() {
            match input.request_stream() {
                Ok(source) => {
                    self.bins = vec![0; source.bin_count()];
                    self.audio = Some(source);
                }
                Err(e) => {
                    warn!("{}", e);
                    window.set_title(&format!("{} | {}", WINDOW_TITLE, e));
                }
            }
        }

        println!("\nVibesphere is running!");
        println!("Press ESC to quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.start_time = Instant::now();
        Ok(())
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        // Get current time
        let time_s = self.start_time.elapsed().as_secs_f32();

        // Sample the newest spectrum (None when no audio is available)
        let bins = match self.audio.as_mut() {
            Some(source) => {
                source.frequency_snapshot(&mut self.bins);
                Some(self.bins.as_slice())
            }
            None => None,
        };

        // Estimate level and reshape the sphere
        let frame = self.sphere.update(bins, time_s);

        render_system.update_vertices(&self.sphere.mesh.vertices);
        let uniforms = Uniforms::from_frame(
            self.camera.view_proj(),
            self.camera.eye(),
            &frame,
            &self.config.render,
        );
        render_system.update_uniforms(&uniforms);

        // Render
        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            error!("{:#}", e);
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.camera.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.load_config()?;
    let audio_input = args.audio_input(&config);

    println!("Vibesphere - Microphone-reactive sphere");
    println!(
        "Deformation: {:?}, color: {:?}, {}x{} segments\n",
        config.shape.deformation,
        config.shape.color_mode,
        config.shape.segments_width,
        config.shape.segments_height
    );

    let mut app = App::new(config, audio_input);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app).context("Event loop failed")?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
