pub mod card;
pub mod catalog;
pub mod chart;
pub mod form_modal;
pub mod legend;

use ratatui::style::Color;

use crate::palette::parse_hex;

/// Map a dataset color onto the terminal palette; gray when missing or unparseable.
pub fn terminal_color(color: Option<&str>) -> Color {
    color
        .and_then(parse_hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}

/// Column just after `text_width` cells of text starting at `start`, kept at or before `last`.
pub fn cursor_column(start: u16, text_width: usize, last: u16) -> u16 {
    let column = usize::from(start).saturating_add(text_width);
    u16::try_from(column).unwrap_or(u16::MAX).min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_color_fallback() {
        assert_eq!(terminal_color(Some("#ff0000")), Color::Rgb(255, 0, 0));
        assert_eq!(terminal_color(Some("red")), Color::Gray);
        assert_eq!(terminal_color(None), Color::Gray);
    }

    #[test]
    fn test_cursor_column_stays_in_bounds() {
        assert_eq!(cursor_column(1, 9, 100), 10);
        assert_eq!(cursor_column(1, 500, 100), 100);
        assert_eq!(cursor_column(u16::MAX - 1, usize::MAX, 118), 118);
    }
}
