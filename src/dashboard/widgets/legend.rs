use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::terminal_color;
use crate::models::{format_value, Widget};

/// One line per label: a swatch in that index's color, then `label: value`.
pub fn legend_lines(widget: &Widget) -> Vec<Line<'static>> {
    widget
        .series()
        .into_iter()
        .map(|point| {
            let value = point.value.map(format_value).unwrap_or_default();
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(terminal_color(point.color))),
                Span::raw(format!("{}: {}", point.label, value)),
            ])
        })
        .collect()
}

pub fn draw_legend(f: &mut Frame, area: Rect, widget: &Widget) {
    let items: Vec<ListItem> = legend_lines(widget).into_iter().map(ListItem::new).collect();
    f.render_widget(List::new(items), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_type::ChartType;
    use crate::form::build_widget;
    use chrono::Utc;
    use ratatui::style::Color;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_legend_pairs_labels_values_and_colors() {
        let widget = build_widget("Alerts", "1,2.5,x", ChartType::Pie, Utc::now());
        let lines = legend_lines(&widget);

        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "■ Label1: 1");
        assert_eq!(text(&lines[1]), "■ Label2: 2.5");
        assert_eq!(text(&lines[2]), "■ Label3: NaN");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(0xFA, 0x80, 0x72)));
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Rgb(0x00, 0x80, 0x80)));
    }

    #[test]
    fn test_missing_color_falls_back_to_gray() {
        let mut widget = build_widget("Alerts", "1,2", ChartType::Bar, Utc::now());
        widget.data.datasets[0].colors.truncate(1);

        let lines = legend_lines(&widget);
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Gray));
    }

    #[test]
    fn test_legend_is_drawn_for_unknown_chart_types() {
        let widget = build_widget("Alerts", "7", ChartType::Other("Radar".to_string()), Utc::now());
        assert_eq!(text(&legend_lines(&widget)[0]), "■ Label1: 7");
    }
}
