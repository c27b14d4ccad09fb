use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    text::Line,
};
use starfall_config::Config;
use starfall_core::{InputEvent, Point};
use starfall_field::{Animator, HalfBlocks, PixelCanvas, StartOutcome, Starfield};
use starfall_widgets::{RevealTracker, TiltCard, Typewriter};

use crate::{
    host::TerminalHost,
    page::{self, PageLayout},
};

/// Longest wait for input when nothing is scheduled sooner.
const MAX_IDLE: Duration = Duration::from_millis(100);
/// Redraw interval while the card eases back.
const SETTLE_TICK: Duration = Duration::from_millis(16);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Paused by the user.
    paused: bool,
    config: Config,
    host: TerminalHost,
    animator: Animator<PixelCanvas>,
    /// Result of the last attempt to start the starfield.
    outcome: StartOutcome,
    typewriter: Typewriter,
    tilt: TiltCard,
    reveal: RevealTracker,
    layout: PageLayout,
    /// First visible page row.
    scroll: u16,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `cols` x `rows`.
    pub fn new(config: Config, cols: u16, rows: u16) -> Self {
        let seed = config.starfield.seed.unwrap_or_else(time_seed);
        let field = Starfield::new(config.starfield.variant, seed);
        let animator = Animator::new(
            field,
            PixelCanvas::new(0, 0),
            config.starfield.frame_rate(),
        );
        let layout = PageLayout::compute(cols, rows, &config.page.sections);
        let mut reveal = RevealTracker::default();
        reveal.relayout(&layout.section_extents());

        Self {
            running: false,
            paused: false,
            host: TerminalHost::new(&config.starfield, cols, rows),
            typewriter: Typewriter::new(config.page.phrases.iter().cloned()),
            tilt: TiltCard::new(layout.card),
            config,
            animator,
            outcome: StartOutcome::MissingSurface,
            reveal,
            layout,
            scroll: 0,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.start_starfield();
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.animator.stop();
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn start_starfield(&mut self) {
        self.outcome = self.animator.start(&self.host, self.now_ms());
        self.paused = false;
    }

    /// Advance everything that is due.
    fn tick(&mut self) {
        let now = self.now_ms();
        self.animator.on_frame(now);
        self.typewriter.advance(now);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = self.now_ms();

        frame.render_widget(HalfBlocks::new(self.animator.canvas()), area);

        self.relayout(area.width, area.height);
        for index in self.reveal.update(self.scroll as u32, area.height as u32) {
            log::debug!("section {index} revealed");
        }

        let mut page_buf = Buffer::empty(Rect::new(0, 0, area.width, self.layout.height));
        page::render_card(
            &mut page_buf,
            self.layout.card,
            &self.config.page.title,
            self.typewriter.text(),
            &self.tilt,
            now,
        );
        for (index, (rect, section)) in self
            .layout
            .sections
            .iter()
            .zip(&self.config.page.sections)
            .enumerate()
        {
            if self.reveal.is_revealed(index) {
                page::render_section(&mut page_buf, *rect, section, index);
            }
        }
        page::blit(&page_buf, self.scroll, frame.buffer_mut(), area);

        let help = Line::from(vec![
            "q".bold().cyan(),
            " quit  ".dark_gray(),
            "p".bold().cyan(),
            " pause  ".dark_gray(),
            "v".bold().cyan(),
            " variant  ".dark_gray(),
            "↑↓".bold().cyan(),
            " scroll  ".dark_gray(),
            self.status().italic().dark_gray(),
        ])
        .centered();
        if area.height > 0 {
            let bottom = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            frame.render_widget(help, bottom);
        }
    }

    /// Recompute the page for the current terminal size.
    fn relayout(&mut self, width: u16, height: u16) {
        self.layout = PageLayout::compute(width, height, &self.config.page.sections);
        self.scroll = self.scroll.min(self.layout.max_scroll());
        self.reveal.relayout(&self.layout.section_extents());
        let viewport = Rect::new(0, 0, width, height);
        self.tilt
            .set_bounds(page::on_screen(self.layout.card, self.scroll, viewport).unwrap_or_default());
    }

    fn status(&self) -> &'static str {
        match self.outcome {
            StartOutcome::Running | StartOutcome::AlreadyRunning if self.paused => "paused",
            StartOutcome::Running | StartOutcome::AlreadyRunning => {
                self.animator.field().variant().name()
            }
            StartOutcome::ReducedMotion => "reduced motion",
            StartOutcome::MissingSurface => "starfield off",
            StartOutcome::NoContext => "no truecolor",
        }
    }

    /// How long to wait for input before the next scheduled update.
    fn poll_timeout(&self, now_ms: u64) -> Duration {
        let mut timeout = MAX_IDLE.min(self.typewriter.next_step_in(now_ms));
        if let Some(frame) = self.animator.next_frame_in(now_ms) {
            timeout = timeout.min(frame);
        }
        if self.tilt.is_settling(now_ms) {
            timeout = timeout.min(SETTLE_TICK);
        }
        timeout
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout(self.now_ms()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                Event::FocusLost => self.on_pointer_leave(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let page = (self.layout.viewport_height / 2).max(1) as i32;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            (_, KeyCode::Char('v')) => self.cycle_variant(),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll_by(1),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll_by(-1),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_by(page),
            (_, KeyCode::PageUp) => self.scroll_by(-page),
            (_, KeyCode::Home) => self.scroll = 0,
            (_, KeyCode::End) => self.scroll = self.layout.max_scroll(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.on_pointer_move(mouse.column, mouse.row)
            }
            MouseEventKind::ScrollDown => self.scroll_by(1),
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            _ => {}
        }
    }

    fn on_pointer_move(&mut self, col: u16, row: u16) {
        let logical = self.host.to_logical(col, row);
        self.animator.handle_event(InputEvent::PointerMove(logical));
        let cell = Point::new(col as f32 + 0.5, row as f32 + 0.5);
        self.tilt.on_pointer_move(cell, self.now_ms());
    }

    fn on_pointer_leave(&mut self) {
        self.animator.handle_event(InputEvent::PointerLeave);
        self.tilt.on_pointer_leave(self.now_ms());
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.host.set_size(cols, rows);
        self.animator
            .handle_event(InputEvent::Resize(self.host.viewport()));
        self.relayout(cols, rows);
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.layout.max_scroll() as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }

    /// Stop or resume the starfield.
    fn toggle_pause(&mut self) {
        if self.animator.is_running() {
            self.animator.stop();
            self.paused = true;
        } else {
            self.start_starfield();
        }
    }

    /// Switch to the next starfield variant. A paused field is repainted
    /// once so it keeps showing stars; a field that never started is left alone.
    fn cycle_variant(&mut self) {
        if !self.outcome.is_running() {
            return;
        }
        let variant = self.animator.field().variant().next();
        self.animator.set_variant(variant);
        if self.paused {
            self.animator.redraw();
        }
        log::info!("switched to {} variant", variant.name());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Seed from the system clock when the config does not pin one.
fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
