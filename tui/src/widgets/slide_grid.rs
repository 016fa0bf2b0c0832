use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use slidesynth_common::Slide;

/// Minimum width of one thumbnail, borders included.
pub const THUMBNAIL_WIDTH: u16 = 28;
/// Title, three bullets and the overflow line, plus borders.
pub const GRID_HEIGHT: u16 = 7;
pub const PREVIEW_BULLETS: usize = 3;
pub const BULLET_PREVIEW_CHARS: usize = 50;

/// Shorten a bullet for the thumbnail view.
pub fn truncate_bullet(bullet: &str) -> String {
    if bullet.chars().count() > BULLET_PREVIEW_CHARS {
        let head: String = bullet.chars().take(BULLET_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        bullet.to_string()
    }
}

pub fn thumbnail_lines(slide: &Slide) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        slide.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for bullet in slide.bullets.iter().take(PREVIEW_BULLETS) {
        lines.push(Line::from(format!("• {}", truncate_bullet(bullet))));
    }
    if slide.bullets.len() > PREVIEW_BULLETS {
        lines.push(Line::from(Span::styled(
            format!("+{} more", slide.bullets.len() - PREVIEW_BULLETS),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// First slide index of the grid page holding `current`.
pub fn page_start(current: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    (current / columns) * columns
}

/// One row of thumbnails: the page of the grid that holds the current slide.
pub struct SlideGrid<'a> {
    slides: &'a [Slide],
    current: usize,
}

impl<'a> SlideGrid<'a> {
    pub fn new(slides: &'a [Slide], current: usize) -> Self {
        Self { slides, current }
    }

    /// Thumbnails per page for `area`; zero when nothing fits.
    pub fn columns(&self, area: Rect) -> usize {
        if self.slides.is_empty() || area.width == 0 {
            return 0;
        }
        usize::from((area.width / THUMBNAIL_WIDTH).max(1)).min(self.slides.len())
    }

    /// Slide index and screen area of every visible thumbnail.
    pub fn layout(&self, area: Rect) -> Vec<(usize, Rect)> {
        let columns = self.columns(area);
        if columns == 0 {
            return Vec::new();
        }
        let start = page_start(self.current, columns);
        let end = (start + columns).min(self.slides.len());
        let count = end - start;
        let constraints = (0..columns).map(|_| Constraint::Ratio(1, columns as u32));
        let cells = Layout::horizontal(constraints).split(area);
        (start..end).zip(cells.iter().take(count).copied()).collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect) -> Vec<(usize, Rect)> {
        let cells = self.layout(area);
        for &(index, cell) in &cells {
            let active = index == self.current;
            let border = if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", index + 1));
            let thumbnail = Paragraph::new(thumbnail_lines(&self.slides[index]))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(thumbnail, cell);
        }
        cells
    }
}
