#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use sector_heatmap::app::App;
use sector_heatmap::market::{self, HeatmapSnapshot};
use sector_heatmap::render::RenderState;

/// Main application handler for winit's event loop.
struct HeatmapViewer {
    app: App,
    render_state: Option<RenderState>,
    window: Option<Arc<Window>>,
}

impl HeatmapViewer {
    fn new(snapshot: HeatmapSnapshot) -> Self {
        Self {
            app: App::new(snapshot),
            render_state: None,
            window: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn update_window_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&self.app.title());
        }
    }
}

impl ApplicationHandler for HeatmapViewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.app.title())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(RenderState::new(window.clone())) {
            Ok(state) => {
                let size = window.inner_size();
                tracing::info!(
                    "Window initialized: scale_factor={:.3}, physical_size={}x{}",
                    window.scale_factor(),
                    size.width,
                    size.height
                );
                // Initial measurement skips the debounce
                self.app.measure_viewport(size.width, size.height);
                self.render_state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                tracing::error!("Failed to initialize GPU: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                // The surface must track the window; the layout waits for the size to settle
                if let Some(render) = &mut self.render_state {
                    render.resize(size.width, size.height);
                }
                if self.app.notify_resize(size.width, size.height, Instant::now()) {
                    self.request_redraw();
                }
                if let Some(deadline) = self.app.resize.deadline() {
                    event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.app.update_hover(position.x as f32, position.y as f32) {
                    self.update_window_title();
                    self.request_redraw();
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if self.app.update_hover(-1.0, -1.0) {
                    self.update_window_title();
                    self.request_redraw();
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left
                    && state == ElementState::Pressed
                    && self.app.click().is_some()
                {
                    self.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && matches!(event.logical_key.as_ref(), Key::Named(NamedKey::Escape))
                {
                    self.app.clear_selection();
                }
            }

            WindowEvent::RedrawRequested => {
                if self.app.relayout() {
                    self.update_window_title();
                }
                self.app.rebuild_scene();

                if let Some(render) = &mut self.render_state {
                    if let Err(e) = render.render(&self.app.scene) {
                        tracing::error!("Render error: {:#}", e);
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.poll_resize(Instant::now()) {
            self.request_redraw();
        }
        match self.app.resize.deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Snapshot from the command line, a file picker, or the built-in demo.
fn load_initial_snapshot() -> HeatmapSnapshot {
    let path = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        rfd::FileDialog::new()
            .set_title("Open heatmap snapshot")
            .add_filter("Heatmap JSON", &["json"])
            .pick_file()
    });

    match path {
        Some(path) => match market::load_snapshot(&path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("{:#}; showing demo data instead", e);
                market::demo::demo_snapshot()
            }
        },
        None => {
            tracing::info!("No snapshot selected, showing demo data");
            market::demo::demo_snapshot()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sector_heatmap=info".parse()?),
        )
        .init();

    let snapshot = load_initial_snapshot();
    tracing::info!(
        "sector-heatmap starting: {} ({} sectors, {} stocks)",
        snapshot.title(),
        snapshot.sectors.len(),
        snapshot.stock_count()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut viewer = HeatmapViewer::new(snapshot);
    event_loop.run_app(&mut viewer)?;

    Ok(())
}
