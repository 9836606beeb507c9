use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::cursor_column;
use crate::form::{FormField, WidgetForm};
use crate::models::Category;

pub fn draw_form_modal(f: &mut Frame, area: Rect, form: &WidgetForm, category: Option<&Category>) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 14.min(area.height.saturating_sub(2));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let title = match category {
        Some(c) => format!(" Add New Widget to {} ", c.name),
        None => " Add New Widget ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Name
                Constraint::Length(3), // Values
                Constraint::Length(3), // Chart type
                Constraint::Min(1),    // Buttons
            ]
            .as_ref(),
        )
        .split(inner);

    draw_text_field(f, rows[0], "Widget Name", &form.name, form.focus == FormField::Name);
    draw_text_field(
        f,
        rows[1],
        "Values (comma-separated)",
        &form.raw_values,
        form.focus == FormField::Values,
    );
    draw_chart_type_field(f, rows[2], form, category);
    draw_buttons(f, rows[3]);

    // Place the terminal cursor at the end of the focused text
    let focused_row = match form.focus {
        FormField::Name => Some(rows[0]),
        FormField::Values => Some(rows[1]),
        FormField::ChartType => None,
    };
    if let (Some(row), Some(text)) = (focused_row, form.focused_text()) {
        let max_x = row.x.saturating_add(row.width.saturating_sub(2));
        let x = cursor_column(row.x.saturating_add(1), text.width(), max_x);
        f.set_cursor(x, row.y + 1);
    }
}

fn field_block(label: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(style)
}

fn draw_text_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let field = Paragraph::new(value.to_string()).block(field_block(label, focused));
    f.render_widget(field, area);
}

/// Label for the chart-type row: the explicit choice, or what would be inherited.
pub fn chart_type_label(form: &WidgetForm, category: Option<&Category>) -> String {
    match (&form.chart_type, category.and_then(|c| c.widgets.first())) {
        (Some(explicit), _) => explicit.to_string(),
        (None, Some(first)) => format!("inherit ({})", first.chart_type),
        (None, None) => "inherit (none; choose one)".to_string(),
    }
}

fn draw_chart_type_field(f: &mut Frame, area: Rect, form: &WidgetForm, category: Option<&Category>) {
    let focused = form.focus == FormField::ChartType;
    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::raw(chart_type_label(form, category)),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]);
    let field = Paragraph::new(line).block(field_block("Chart Type", focused));
    f.render_widget(field, area);
}

fn draw_buttons(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let buttons = Line::from(vec![
        Span::raw("["),
        Span::styled("Tab", key),
        Span::raw("] next field  ["),
        Span::styled("Esc", key),
        Span::raw("] Cancel  ["),
        Span::styled("Enter", key),
        Span::raw("] Add Widget"),
    ]);
    f.render_widget(Paragraph::new(buttons).alignment(Alignment::Right), area);
}
