use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const APP_TITLE: &str = "SlideSynth";
pub const APP_SUBTITLE: &str = "Transform PDFs into professional presentation slides with AI";

/// Height of the header, borders included.
pub const BANNER_HEIGHT: u16 = 4;

/// Application header shown above the upload panel.
pub struct Banner;

impl Widget for Banner {
    fn render(self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                APP_TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(APP_SUBTITLE, Style::default().fg(Color::Gray))),
        ];
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::BOTTOM))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
