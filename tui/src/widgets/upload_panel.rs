use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use slidesynth_protocol::{ProcessingState, SessionView};

pub const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

pub fn status_icon(state: ProcessingState) -> &'static str {
    match state {
        ProcessingState::Idle => "[pdf]",
        ProcessingState::Uploading => "[ ^ ]",
        ProcessingState::Processing => "[txt]",
        ProcessingState::Generating => "[ ai]",
        ProcessingState::Success => "[ ok]",
        ProcessingState::Error => "[ x ]",
    }
}

/// Upload controls, progress and the error line with its retry hint.
pub struct UploadPanel<'a> {
    view: &'a SessionView,
    spinner: char,
    input: Option<&'a str>,
}

impl<'a> UploadPanel<'a> {
    pub fn new(view: &'a SessionView, spinner: char) -> Self {
        Self {
            view,
            spinner,
            input: None,
        }
    }

    /// Show the path prompt with its current contents.
    pub fn input(mut self, input: Option<&'a str>) -> Self {
        self.input = input;
        self
    }

    /// Rows needed, borders included.
    pub fn height(&self) -> u16 {
        let mut rows = 2;
        if !self.view.progress.is_empty() {
            rows += 1;
        }
        if self.view.error.is_some() {
            rows += 1;
        }
        if self.input.is_some() {
            rows += 1;
        }
        rows + 2
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let state = self.view.state;
        let busy = state.is_busy();
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{} ", status_icon(state)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("Upload Your PDF", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "  Transform your documents into beautiful presentations with AI",
                Style::default().fg(Color::Gray),
            ),
        ])];

        let button = if state.accepts_upload() {
            Line::from(Span::styled(
                "[o] Choose PDF File",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ))
        } else {
            let mut label = "Processing...".to_string();
            if busy {
                label.push(' ');
                label.push(self.spinner);
            }
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray)))
        };
        lines.push(button);

        if !self.view.progress.is_empty() {
            let color = match state {
                ProcessingState::Success => Color::Green,
                ProcessingState::Error => Color::Red,
                _ => Color::Yellow,
            };
            let text = if busy {
                format!("{} {}", self.spinner, self.view.progress)
            } else {
                self.view.progress.clone()
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
        }

        if let Some(error) = &self.view.error {
            lines.push(Line::from(vec![
                Span::styled(error.clone(), Style::default().fg(Color::Red)),
                Span::raw("  "),
                Span::styled(
                    "[r] Try Again",
                    Style::default().fg(Color::Black).bg(Color::Red),
                ),
            ]));
        }

        if let Some(input) = self.input {
            lines.push(Line::from(vec![
                Span::styled("PDF path: ", Style::default().fg(Color::Cyan)),
                Span::raw(input),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]));
        }
        lines
    }
}

impl<'a> Widget for UploadPanel<'a> {
    fn render(self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let border = match self.view.state {
            ProcessingState::Success => Color::Green,
            ProcessingState::Error => Color::Red,
            _ => Color::Cyan,
        };
        Paragraph::new(self.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
