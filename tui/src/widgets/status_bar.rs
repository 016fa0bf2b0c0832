use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use slidesynth_protocol::HealthState;

pub struct StatusBar<'a> {
    mode: &'a str,
    status: &'a str,
    health: Option<&'a HealthState>,
    hints: &'a str,
    notice: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(mode: &'a str, status: &'a str, hints: &'a str) -> Self {
        Self {
            mode,
            status,
            health: None,
            hints,
            notice: None,
        }
    }

    pub fn health(mut self, health: Option<&'a HealthState>) -> Self {
        self.health = health;
        self
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }
}

fn health_span(health: Option<&HealthState>) -> Span<'static> {
    match health {
        None => Span::styled("backend: -", Style::default().fg(Color::DarkGray)),
        Some(HealthState::Checking) => {
            Span::styled("backend: checking...", Style::default().fg(Color::Yellow))
        }
        Some(HealthState::Healthy { status }) => Span::styled(
            format!("backend: {status}"),
            Style::default().fg(Color::Green),
        ),
        Some(HealthState::Unreachable { message }) => Span::styled(
            format!("backend unreachable: {message}"),
            Style::default().fg(Color::Red),
        ),
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.mode),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(self.status.to_string(), Style::default().fg(Color::Yellow)),
        ];
        if let Some(notice) = self.notice {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(notice, Style::default().fg(Color::Green)));
        }
        spans.extend([
            Span::raw("  |  "),
            health_span(self.health),
            Span::raw("  |  "),
            Span::styled(self.hints, Style::default().fg(Color::Gray)),
        ]);
        let widget = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Left);
        widget.render(area, buf);
    }
}
