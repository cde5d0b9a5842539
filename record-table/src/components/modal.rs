//! Modal overlay helpers

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

pub const MODAL_BG: Color = Color::Rgb(28, 28, 38);

/// Dim everything drawn so far, clear `area` and frame it with a titled
/// border. Returns the inner area for the modal content.
///
/// Call after the background has been rendered.
pub fn render_modal(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let dim = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    let screen = frame.area();
    frame.buffer_mut().set_style(screen, dim);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
        .style(Style::default().bg(MODAL_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Rectangle of at most `width` x `height` centred in `area`, leaving a
/// one-cell margin
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use record_table_core::testing::RenderHarness;

    #[test]
    fn test_modal_draws_title_and_content() {
        let mut render = RenderHarness::new(40, 10);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("background"), frame.area());
            let area = centered_rect(20, 5, frame.area());
            let inner = render_modal(frame, area, "Dialog");
            frame.render_widget(Paragraph::new("inside"), inner);
        });
        assert!(output.contains("Dialog"));
        assert!(output.contains("inside"));
    }

    #[test]
    fn test_modal_dims_background() {
        let mut render = RenderHarness::new(40, 10);
        let buffer = render.render(|frame| {
            frame.render_widget(Paragraph::new("background"), frame.area());
            render_modal(frame, centered_rect(10, 4, frame.area()), "x");
        });
        assert!(buffer[(0, 0)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        let small = centered_rect(100, 50, Rect::new(0, 0, 30, 10));
        assert_eq!((small.width, small.height), (28, 8));
    }
}
