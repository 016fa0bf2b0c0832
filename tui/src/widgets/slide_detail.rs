use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use slidesynth_common::Slide;
use unicode_width::UnicodeWidthStr;

const PREVIOUS_LABEL: &str = "← Previous";
const NEXT_LABEL: &str = "Next →";

/// Full view of the current slide with its navigation row.
pub struct SlideDetail<'a> {
    slide: &'a Slide,
    index: usize,
    total: usize,
}

impl<'a> SlideDetail<'a> {
    pub fn new(slide: &'a Slide, index: usize, total: usize) -> Self {
        Self {
            slide,
            index,
            total,
        }
    }

    fn bullet_lines(&self) -> Vec<Line<'a>> {
        self.slide
            .bullets
            .iter()
            .map(|bullet| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::Cyan)),
                    Span::raw(bullet.as_str()),
                ])
            })
            .collect()
    }

    fn navigation_line(&self, width: u16) -> Line<'static> {
        let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);
        let has_previous = self.index > 0;
        let has_next = self.index + 1 < self.total;
        let used = PREVIOUS_LABEL.width() + NEXT_LABEL.width();
        let gap = usize::from(width).saturating_sub(used).max(2);
        Line::from(vec![
            Span::styled(PREVIOUS_LABEL, if has_previous { enabled } else { disabled }),
            Span::raw(" ".repeat(gap)),
            Span::styled(NEXT_LABEL, if has_next { enabled } else { disabled }),
        ])
    }
}

impl<'a> Widget for SlideDetail<'a> {
    fn render(self, area: ratatui::layout::Rect, buf: &mut ratatui::buffer::Buffer) {
        let counter = format!(" {} of {} ", self.index + 1, self.total);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(Span::styled(
                format!(" {} ", self.slide.title),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .title(Line::from(counter).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        let [body, nav] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        Paragraph::new(self.bullet_lines())
            .wrap(Wrap { trim: true })
            .render(body, buf);
        self.navigation_line(nav.width).render(nav, buf);
    }
}
