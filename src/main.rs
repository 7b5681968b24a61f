use std::sync::Arc;

use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use game_view::cli::Cli;
use game_view::core::{
    DemoScene, GpuContext, ResolutionAction, SettingsFile, SizeHint, ViewportRenderer,
    WgpuBackend,
};
use game_view::math::Size;
use game_view::traits::ViewHost;

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 1024;
const INITIAL_WINDOW_HEIGHT: u32 = 768;

type Renderer = ViewportRenderer<WgpuBackend, WindowHost>;

// === Host ===

/// Presents size changes in the window title and forwards redraw requests
struct WindowHost {
    window: Arc<Window>,
}

impl ViewHost for WindowHost {
    fn target_size_changed(&self, size: Size, hint: SizeHint) {
        let label = match hint {
            SizeHint::Auto => "auto",
            SizeHint::Custom => "custom",
            SizeHint::Oversized => "scaled",
        };
        self.window
            .set_title(&format!("Game View - {} ({})", size, label));
        let color = hint.color();
        debug!(
            "Size field {} shown {:?} (rgb {},{},{})",
            size, hint, color.r, color.g, color.b
        );
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn window_size(window: &Window) -> Size {
    let size = window.inner_size();
    Size::new(size.width, size.height)
}

// === Application ===

struct App {
    cli: Cli,
    settings: SettingsFile,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
}

impl App {
    fn new(cli: Cli, settings: SettingsFile) -> Self {
        Self {
            cli,
            settings,
            window: None,
            renderer: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title("Game View")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            )?,
        );
        let area = window_size(&window);

        let (gpu, surface, adapter) = pollster::block_on(GpuContext::for_window(window.clone()))?;
        let format = WgpuBackend::surface_format(&surface, &adapter)?;
        let scene = DemoScene::new(&gpu, format);
        let backend = WgpuBackend::new(gpu, surface, &adapter, area, Box::new(scene))?;

        let host = WindowHost {
            window: window.clone(),
        };
        let mut renderer = ViewportRenderer::new(backend, host, area)
            .with_external_target(self.cli.external_target());

        if let Some(node) = self.settings.view(&self.cli.view) {
            renderer.load_settings(node);
        }
        match self.cli.size_mode(renderer.target_size()) {
            Some(mode) => renderer.set_mode(mode),
            None => renderer.activate(),
        }
        info!(
            "Game view {} in {} ({:?})",
            renderer.target_size(),
            renderer.display_area(),
            renderer.mode()
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        match key {
            KeyCode::Tab => {
                let choices = renderer.resolution_choices();
                let current = choices.iter().position(|c| c.checked);
                let next = current.map_or(0, |i| (i + 1) % choices.len());
                if let Some(choice) = choices.get(next) {
                    info!("Resolution: {}", choice.label);
                    renderer.choose(choice.action);
                }
            }
            KeyCode::KeyD => renderer.choose(ResolutionAction::MatchDisplayArea),
            KeyCode::KeyG => renderer.choose(ResolutionAction::MatchExternalTarget),
            KeyCode::KeyF => {
                let size = renderer.commit_fixed_size(&self.cli.width, &self.cli.height);
                info!("Fixed size {}", size);
            }
            _ => {}
        }
    }

    fn shutdown(&mut self) {
        let Some(mut renderer) = self.renderer.take() else {
            return;
        };

        match renderer.save_settings() {
            Ok(node) => self.settings.set_view(&self.cli.view, node),
            Err(e) => warn!("Failed to encode settings: {}", e),
        }
        match self.settings.save(&self.cli.settings) {
            Ok(()) => info!("Saved settings to {}", self.cli.settings.display()),
            Err(e) => warn!("Failed to save settings: {}", e),
        }
        renderer.deactivate();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                error!("Failed to initialize game view: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.on_display_area_changed(Size::new(size.width, size.height));
                }
            }
            WindowEvent::Focused(true) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.record_recent_size();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render_frame() {
                        error!("Render error: {}", e);
                    }
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

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = SettingsFile::load(&cli.settings).unwrap_or_else(|e| {
        warn!("Ignoring unreadable settings: {}", e);
        SettingsFile::default()
    });

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, settings);

    println!(
        "Game View - Controls: Tab cycles resolutions, D display, G game, F fixed, Escape to quit"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
