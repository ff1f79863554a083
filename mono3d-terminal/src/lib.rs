/// Terminal host for the 1-bit rasterizer
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use log::{debug, trace};
use mono3d_core::{FrameBuffer, FrameStatus, Renderer};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod display;
pub mod input;

pub use display::BitmapDisplay;
pub use input::{Command, Crank};

/// Main application struct for terminal 3D rendering
///
/// Owns the frame memory and lends it to the renderer once per tick.
pub struct TerminalApp {
    renderer: Renderer,
    frame: Vec<u8>,
    display: BitmapDisplay,
    crank: Crank,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(renderer: Renderer) -> Self {
        let geometry = renderer.geometry();

        Self {
            frame: vec![0; geometry.buffer_len()],
            display: BitmapDisplay::new(geometry),
            renderer,
            crank: Crank::new(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_secs_f32(1.0 / self.renderer.refresh_rate() as f32);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.crank.tick();

            // Render
            self.render()?;

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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => match Command::from_key(code) {
                Some(Command::Quit) => self.running = false,
                Some(Command::Turn(degrees)) => self.crank.turn(degrees),
                Some(Command::ToggleAutoCrank) => self.crank.toggle_auto(),
                None => {}
            },
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                // Stale cells from the old layout need a full repaint
                self.renderer.invalidate();
            }
            _ => {}
        }
    }

    fn render(&mut self) -> Result<()> {
        let geometry = self.renderer.geometry();
        let status = {
            let mut frame = FrameBuffer::new(&mut self.frame, geometry)?;
            self.renderer.render_frame(self.crank.angle(), &mut frame)
        };

        let mut stdout = stdout();
        let size = terminal::size()?;

        if let FrameStatus::Drawn { rows } = status {
            trace!("Presenting rows {:?}", rows);
            queue!(stdout, Clear(ClearType::All))?;
            self.display.draw(&mut stdout, &self.frame, rows, size)?;
        }

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "mono3d | FPS: {:.1} | Crank: {:5.1}{} | A/D/Arrows=Crank Space=Auto Q=Quit",
                self.fps,
                self.crank.angle(),
                if self.crank.is_auto() { " (auto)" } else { "" }
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
