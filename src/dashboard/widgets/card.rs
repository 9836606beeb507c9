use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
    Frame,
};

use super::{chart::draw_chart, legend::draw_legend};
use crate::models::Widget;

pub fn draw_widget_card(f: &mut Frame, area: Rect, widget: &Widget, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .title(format!(" {} ", widget.name))
        .borders(Borders::ALL)
        .border_style(border_style);
    if selected {
        block = block.title(
            Title::from(Span::styled(" ✕ [d] ", Style::default().fg(Color::Red)))
                .alignment(Alignment::Right),
        );
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(inner);

    draw_chart(f, halves[0], widget);
    draw_legend(f, halves[1], widget);
}

pub fn draw_add_card(f: &mut Frame, area: Rect) {
    let text = Line::from(vec![
        Span::styled("+ ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Span::styled("Add Widget", Style::default().fg(Color::Blue)),
        Span::styled("  [a]", Style::default().fg(Color::DarkGray)),
    ]);

    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_type::ChartType;
    use crate::form::build_widget;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_card_shows_name_and_legend() {
        let widget = build_widget("Workload Alerts", "3,14", ChartType::Bar, Utc::now());
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                draw_widget_card(f, area, &widget, true)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol())
                    .collect()
            })
            .collect();
        let screen = rows.join("\n");

        assert!(screen.contains("Workload Alerts"));
        assert!(screen.contains("Label1: 3"));
        assert!(screen.contains("Label2: 14"));
        assert!(screen.contains("[d]"));
    }
}
