/// Terminal viewer for fuel-cell stack mock-ups
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use fcstack_core::{Camera, OrbitControls, Scene};
use log::{debug, info};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

mod args;
pub mod config;
pub mod error;
pub mod renderer;
pub mod report;

pub use args::Args;
pub use error::AppError;
pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Orbit step per key press (radians)
const KEY_ROTATE_STEP: f32 = 0.1;

/// Orbit per dragged cell (radians)
const DRAG_ROTATE_STEP: f32 = 0.05;

/// Run the viewer for the given arguments.
///
/// # Errors
///
/// Returns [`AppError`] for unreadable or malformed configuration, an
/// invalid stack description, or terminal I/O failures.
pub fn run(args: &Args) -> Result<(), AppError> {
    let mut scene_config = config::load_config(args.config.as_deref())?;
    if let Some(start_offset) = args.start_offset {
        scene_config.start_offset = start_offset;
    }

    let scene = Scene::build(&scene_config)?;

    if args.print_layout {
        report::write_layout(&mut stdout().lock(), &scene.layout)?;
        return Ok(());
    }

    let mut app = TerminalApp::new(scene)?;
    app.run()?;
    Ok(())
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    controls: OrbitControls,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    drag_from: Option<(u16, u16)>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, width, height))
    }

    /// Build the app for a fixed frame size without touching the terminal
    pub fn with_size(scene: Scene, width: u16, height: u16) -> Self {
        let mut camera = Camera::new(width as u32, height as u32);
        camera.set_viewport(width as f32, height as f32 * CELL_ASPECT);
        camera.fov = scene.camera.fov_degrees.to_radians();
        let controls = initial_controls(&scene);
        controls.apply(&mut camera);

        Self {
            scene,
            controls,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            drag_from: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        info!(objects = self.scene.objects.len(), triangles = self.scene.triangle_count(); "Entering render loop");

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.tick()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// One frame: advance the controls and redraw
    fn tick(&mut self) -> io::Result<()> {
        self.update();
        self.render()
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, modifiers, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.controls.rotate(0.0, KEY_ROTATE_STEP);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.controls.rotate(0.0, -KEY_ROTATE_STEP);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.controls.rotate(-KEY_ROTATE_STEP, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.controls.rotate(KEY_ROTATE_STEP, 0.0);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.controls.zoom(1.0);
            }
            KeyCode::Char('-') => {
                self.controls.zoom(-1.0);
            }
            KeyCode::Char('r') => {
                self.controls = initial_controls(&self.scene);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_from = Some((column, row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((from_column, from_row)) = self.drag_from {
                    let dx = column as f32 - from_column as f32;
                    let dy = row as f32 - from_row as f32;
                    // Rows are taller than columns
                    self.controls
                        .rotate(-dx * DRAG_ROTATE_STEP, dy * DRAG_ROTATE_STEP * CELL_ASPECT);
                }
                self.drag_from = Some((column, row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_from = None;
            }
            MouseEventKind::ScrollUp => self.controls.zoom(1.0),
            MouseEventKind::ScrollDown => self.controls.zoom(-1.0),
            _ => {}
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        debug!(width = width, height = height; "Terminal resized");
        self.renderer.resize(width as usize, height as usize);
        self.camera
            .set_viewport(width as f32, height as f32 * CELL_ASPECT);
    }

    fn update(&mut self) {
        let auto_rotate = self.scene.camera.auto_rotate;
        if auto_rotate != 0.0 && self.drag_from.is_none() {
            self.controls.spin(auto_rotate);
        }
        self.controls.update();
        self.controls.apply(&mut self.camera);
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        self.renderer.render_scene(&self.scene, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, self.scene.background)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "FCStack | {} layers, extent {:.2} | FPS: {:.1} | Drag/WASD=Orbit Scroll/+-=Zoom R=Reset Q=Quit",
                self.scene.layout.len(),
                self.scene.layout.total_extent(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

fn initial_controls(scene: &Scene) -> OrbitControls {
    let camera = &scene.camera;
    OrbitControls::from_eye(
        Point3::from(camera.position),
        Point3::from(camera.target),
        camera.damping,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcstack_core::SceneConfig;

    fn app() -> TerminalApp {
        let mut config = SceneConfig::default();
        config.camera.damping = 0.0;
        TerminalApp::with_size(Scene::build(&config).unwrap(), 80, 24)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(!app.is_running());

        let mut app = self::app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.is_running());
    }

    #[test]
    fn test_initial_camera_matches_config() {
        let app = app();
        let position = app.camera().position;
        assert!((position.x - 3.0).abs() < 1e-3);
        assert!((position.y - 3.0).abs() < 1e-3);
        assert!((position.z - 8.0).abs() < 1e-3);
        assert!((app.camera().aspect - 80.0 / 48.0).abs() < 1e-6);
    }

    #[test]
    fn test_key_orbit_moves_camera() {
        let mut app = app();
        let yaw = app.controls().yaw;
        app.handle_event(key(KeyCode::Right));
        app.update();
        assert!((app.controls().yaw - yaw - KEY_ROTATE_STEP).abs() < 1e-5);

        app.handle_event(key(KeyCode::Char('r')));
        assert!((app.controls().yaw - yaw).abs() < 1e-6);
    }

    #[test]
    fn test_drag_orbits_and_scroll_zooms() {
        let mut app = app();
        let yaw = app.controls().yaw;
        let distance = app.controls().distance;

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 14, 10));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 14, 10));
        app.update();
        assert!((app.controls().yaw - (yaw - 4.0 * DRAG_ROTATE_STEP)).abs() < 1e-5);

        app.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0));
        assert!(app.controls().distance < distance);
    }

    #[test]
    fn test_resize_adapts_frame_and_aspect() {
        let mut app = app();
        app.handle_event(Event::Resize(120, 30));
        assert_eq!(app.renderer().width(), 120);
        assert_eq!(app.renderer().height(), 30);
        assert!((app.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_auto_rotate_spins_when_idle() {
        let mut config = SceneConfig::default();
        config.camera.damping = 0.0;
        config.camera.auto_rotate = 0.02;
        let mut app = TerminalApp::with_size(Scene::build(&config).unwrap(), 80, 24);
        let yaw = app.controls().yaw;
        app.update();
        app.update();
        assert!((app.controls().yaw - yaw - 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_auto_rotate_rate_holds_with_damping() {
        let mut config = SceneConfig::default();
        config.camera.auto_rotate = 0.02;
        assert!(config.camera.damping > 0.0);
        let mut app = TerminalApp::with_size(Scene::build(&config).unwrap(), 80, 24);
        let yaw = app.controls().yaw;
        for _ in 0..100 {
            app.update();
        }
        assert!((app.controls().yaw - yaw - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_auto_rotate_pauses_while_dragging() {
        let mut config = SceneConfig::default();
        config.camera.auto_rotate = 0.02;
        let mut app = TerminalApp::with_size(Scene::build(&config).unwrap(), 80, 24);
        let yaw = app.controls().yaw;
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        app.update();
        assert!((app.controls().yaw - yaw).abs() < 1e-6);
    }
}
