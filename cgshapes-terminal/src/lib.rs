/// Terminal front end: rasterizes any scene to the terminal with crossterm
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use nalgebra::Matrix4;
use cgshapes_core::{Camera, ProjectionMode, RotationState, Scene, Transform, Viewport};

pub mod cli;
pub mod clock;
pub mod logging;
pub mod renderer;

pub use clock::FrameClock;
pub use renderer::AsciiRenderer;

const ORBIT_STEP: f32 = 0.1;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Box<dyn Scene>,
    orbit: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    clock: FrameClock,
    paused: bool,
    running: bool,
}

impl TerminalApp {
    pub fn new(scene: Box<dyn Scene>, mode: ProjectionMode) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, mode, width, height))
    }

    /// Scenes that project themselves always get a clip-space camera
    pub fn with_size(scene: Box<dyn Scene>, mode: ProjectionMode, width: u16, height: u16) -> Self {
        let mode = if scene.includes_projection() {
            ProjectionMode::ClipSpace
        } else {
            mode
        };
        Self {
            scene,
            orbit: RotationState::zero(),
            camera: Camera::new(width as u32, height as u32).with_mode(mode),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            clock: FrameClock::new(),
            paused: false,
            running: true,
        }
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn orbit(&self) -> RotationState {
        self.orbit
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        log::info!("running scene {}", self.scene.name());

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
        self.clock.reset();

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            let time = self.clock.tick();
            self.scene.update(time.dt);

            self.render()?;

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let viewport = Viewport::new(self.renderer.width() as u32, self.renderer.height() as u32);
                let ndc = viewport.to_ndc(column as f32 + 0.5, row as f32 + 0.5);
                if self.scene.click(ndc) {
                    log::debug!("click at ({:.2}, {:.2}) changed the scene", ndc.x, ndc.y);
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.camera.set_viewport(width as u32, height as u32);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                self.scene.set_paused(self.paused);
                if !self.paused {
                    self.clock.reset();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust(1),
            KeyCode::Char('-') | KeyCode::Char('_') => self.adjust(-1),
            KeyCode::Char('w') | KeyCode::Up => self.orbit.rotate(ORBIT_STEP, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.orbit.rotate(-ORBIT_STEP, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.orbit.rotate(0.0, -ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orbit.rotate(0.0, ORBIT_STEP, 0.0),
            _ => {}
        }
    }

    fn adjust(&mut self, delta: i32) {
        if self.scene.adjust(delta) {
            log::info!(
                "{} control now {:?}, {} vertices",
                self.scene.name(),
                self.scene.control_value(),
                self.scene.mesh().vertex_count()
            );
        }
    }

    /// Camera and orbit applied ahead of every draw call
    pub fn view_matrix(&self) -> Matrix4<f32> {
        if self.scene.includes_projection() {
            return Matrix4::identity();
        }
        Transform::mvp_matrix(
            &Transform::rotation_matrix(&self.orbit),
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(),
        )
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.view_matrix();

        self.renderer.clear(self.scene.clear_color());
        self.renderer.render_scene(self.scene.as_ref(), &view);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    pub fn status_line(&self) -> String {
        let control = self
            .scene
            .control_value()
            .map(|value| format!(" | value: {value} (+/-)"))
            .unwrap_or_default();
        let state = if self.paused { " | paused" } else { "" };
        format!(
            "{}{}{} | FPS: {:.1} | Space=Pause WASD/Arrows=Orbit Click=Select Q=Quit",
            self.scene.name(),
            control,
            state,
            self.clock.fps()
        )
    }
}
