use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    prelude::*,
    text::{Line, Span},
    widgets::Paragraph,
};
use slidesynth_core::Synth;
use slidesynth_protocol::{Event, HealthState, Op, ProcessingState, SessionView};
use std::{io, path::PathBuf};
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::widgets::{
    banner::{Banner, BANNER_HEIGHT},
    slide_detail::SlideDetail,
    slide_grid::{page_start, SlideGrid, GRID_HEIGHT},
    status_bar::StatusBar,
    upload_panel::{UploadPanel, SPINNER_FRAMES},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    PathInput,
}

/// What to do right after the terminal is set up.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub check_health: bool,
    pub initial_file: Option<PathBuf>,
}

/// Terminal-side state: the latest session snapshot plus purely local UI state.
pub struct SynthApp {
    running: bool,
    mode: Mode,
    input: String,
    view: SessionView,
    health: Option<HealthState>,
    notice: Option<String>,
    tick: usize,
    thumbnails: Vec<(usize, Rect)>,
    /// Thumbnails per grid page as of the last draw.
    grid_columns: usize,
}

impl Default for SynthApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthApp {
    pub fn new() -> Self {
        Self {
            running: true,
            mode: Mode::Normal,
            input: String::new(),
            view: SessionView::default(),
            health: None,
            notice: None,
            tick: 0,
            thumbnails: Vec::new(),
            grid_columns: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn is_entering_path(&self) -> bool {
        self.mode == Mode::PathInput
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn apply_event(&mut self, event: Event) {
        match event {
            Event::SessionUpdated(view) => self.view = view,
            Event::Health(state) => self.health = Some(state),
            Event::DownloadSaved { path } => {
                self.notice = Some(format!("Saved {}", path.display()));
            }
            Event::ShutdownComplete => self.running = false,
        }
    }

    /// Translate a key press into a session operation.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Op> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }
        match self.mode {
            Mode::PathInput => self.handle_path_key(key),
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_path_key(&mut self, key: KeyEvent) -> Option<Op> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.input.clear();
                None
            }
            KeyCode::Enter => {
                let path = self.input.trim();
                if path.is_empty() {
                    return None;
                }
                let path = PathBuf::from(path);
                self.mode = Mode::Normal;
                self.input.clear();
                self.notice = None;
                Some(Op::SelectFile { path })
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Op> {
        let presentable = self.view.is_presentable();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                None
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                if self.view.state.accepts_upload() {
                    self.mode = Mode::PathInput;
                }
                None
            }
            KeyCode::Left | KeyCode::Char('h') if presentable && self.view.has_previous() => {
                Some(Op::PreviousSlide)
            }
            KeyCode::Right | KeyCode::Char('l') if presentable && self.view.has_next() => {
                Some(Op::NextSlide)
            }
            KeyCode::Char(digit @ '1'..='9') if presentable => {
                let offset = digit as usize - '1' as usize;
                if offset >= self.grid_columns {
                    return None;
                }
                let index = self.page_start() + offset;
                (index < self.view.slides.len()).then_some(Op::SelectSlide { index })
            }
            KeyCode::PageDown if presentable && self.grid_columns > 0 => {
                let index = self.page_start() + self.grid_columns;
                (index < self.view.slides.len()).then_some(Op::SelectSlide { index })
            }
            KeyCode::PageUp if presentable && self.grid_columns > 0 => {
                let start = self.page_start();
                (start > 0).then(|| Op::SelectSlide {
                    index: start.saturating_sub(self.grid_columns),
                })
            }
            KeyCode::Char('d') if presentable => Some(Op::DownloadPptx),
            KeyCode::Char('r') => {
                self.input.clear();
                self.notice = None;
                Some(Op::Reset)
            }
            KeyCode::Char('c') => Some(Op::CheckHealth),
            _ => None,
        }
    }

    /// Left click on a thumbnail selects that slide.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Op> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let at = Position::new(mouse.column, mouse.row);
        self.thumbnails
            .iter()
            .find(|(_, area)| area.contains(at))
            .map(|&(index, _)| Op::SelectSlide { index })
    }

    fn page_start(&self) -> usize {
        page_start(self.view.current_slide, self.grid_columns)
    }

    fn mode_label(&self) -> &'static str {
        match self.mode {
            Mode::Normal => "NORMAL",
            Mode::PathInput => "OPEN",
        }
    }

    fn hints(&self) -> &'static str {
        if self.mode == Mode::PathInput {
            return "Enter upload  Esc cancel";
        }
        match self.view.state {
            ProcessingState::Idle if self.view.error.is_some() => {
                "o open  r try again  c health  q quit"
            }
            ProcessingState::Idle => "o open  c health  q quit",
            ProcessingState::Success => "←/→ navigate  PgUp/PgDn page  1-9 jump  d download  r new upload  q quit",
            ProcessingState::Error => "r try again  q quit",
            _ => "r cancel  q quit",
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let spinner = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];
        let input = (self.mode == Mode::PathInput).then_some(self.input.as_str());
        let upload = UploadPanel::new(&self.view, spinner).input(input);
        let presentable = self.view.is_presentable();

        let mut constraints = vec![
            Constraint::Length(BANNER_HEIGHT),
            Constraint::Length(upload.height()),
        ];
        if presentable {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(GRID_HEIGHT));
            constraints.push(Constraint::Min(5));
        } else {
            constraints.push(Constraint::Min(0));
        }
        constraints.push(Constraint::Length(3));
        let chunks = Layout::vertical(constraints).split(area);

        f.render_widget(Banner, chunks[0]);
        f.render_widget(upload, chunks[1]);

        let status_area = chunks[chunks.len() - 1];
        self.thumbnails.clear();
        self.grid_columns = 0;
        if presentable {
            let header = Line::from(vec![
                Span::styled(
                    format!("Generated Slides ({})", self.view.slides.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("[d] Download PPTX", Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled("[r] New Upload", Style::default().fg(Color::Cyan)),
            ]);
            f.render_widget(Paragraph::new(header), chunks[2]);

            let grid = SlideGrid::new(&self.view.slides, self.view.current_slide);
            self.grid_columns = grid.columns(chunks[3]);
            self.thumbnails = grid.render(f, chunks[3]);

            if let Some(slide) = self.view.current() {
                let detail =
                    SlideDetail::new(slide, self.view.current_slide, self.view.slides.len());
                f.render_widget(detail, chunks[4]);
            }
        }

        let status = self.view.state.to_string();
        let bar = StatusBar::new(self.mode_label(), &status, self.hints())
            .health(self.health.as_ref())
            .notice(self.notice.as_deref());
        f.render_widget(bar, status_area);
    }
}

pub async fn run_app(synth: Synth, options: AppOptions) -> Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &synth, options).await;
    let _ = synth.submit(Op::Shutdown).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    synth: &Synth,
    options: AppOptions,
) -> Result<()> {
    let mut app = SynthApp::new();
    if options.check_health {
        synth.submit(Op::CheckHealth).await?;
    }
    if let Some(path) = options.initial_file {
        synth.submit(Op::SelectFile { path }).await?;
    }
    let mut tick_interval = interval(Duration::from_millis(120));

    while app.is_running() {
        terminal.draw(|f| app.draw(f))?;

        tokio::select! {
            _ = tick_interval.tick() => app.on_tick(),
            maybe_ev = synth.next_event() => match maybe_ev {
                Some(ev) => app.apply_event(ev),
                None => break,
            },
            event_result = tokio::task::spawn_blocking(|| event::poll(Duration::from_millis(50))) => {
                if let Ok(Ok(true)) = event_result {
                    let op = match event::read()? {
                        TermEvent::Key(key) => app.handle_key(key),
                        TermEvent::Mouse(mouse) => app.handle_mouse(mouse),
                        _ => None,
                    };
                    if let Some(op) = op {
                        debug!(?op, "submitting");
                        synth.submit(op).await?;
                    }
                }
            }
        }
    }
    Ok(())
}
