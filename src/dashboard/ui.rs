use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, InputMode, StatusLevel};
use super::widgets::{
    card::{draw_add_card, draw_widget_card},
    catalog::draw_catalog,
    cursor_column,
    form_modal::draw_form_modal,
};

const CARD_HEIGHT: u16 = 10;
const CARDS_PER_ROW: usize = 3;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.refresh_view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header + search
                Constraint::Length(3), // Category tabs
                Constraint::Min(5),    // Widget cards
                Constraint::Length(1), // Status
                Constraint::Length(2), // Help
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_tabs(f, chunks[1], app);
    draw_cards(f, chunks[2], app);
    draw_status(f, chunks[3], app);
    draw_help(f, chunks[4], app);

    if app.catalog_open {
        let size = f.size();
        let width = (size.width / 3).max(30).min(size.width);
        let area = Rect::new(size.width - width, 0, width, size.height);
        draw_catalog(f, area, app.store.categories(), app.catalog_tab);
    }

    if app.form.is_open() {
        let area = f.size();
        let category = app.store.category(&app.form.category_id);
        draw_form_modal(f, area, &app.form, category);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let searching = app.input_mode == InputMode::Search;
    let prompt = Span::styled(" Search: ", Style::default().fg(Color::Gray));
    let query = if app.query.is_empty() && !searching {
        Span::styled("anything... [/]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.query.clone(), Style::default().fg(Color::White))
    };

    let header = Paragraph::new(Line::from(vec![prompt.clone(), query]))
        .block(
            Block::default()
                .title(" CNAPP Dashboard ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(if searching {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Cyan)
                }),
        );

    f.render_widget(header, area);

    if searching {
        let text_width = prompt.content.width().saturating_add(app.query.width());
        let x = cursor_column(area.x.saturating_add(1), text_width, area.right().saturating_sub(2));
        f.set_cursor(x, area.y + 1);
    }
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .visible()
        .iter()
        .map(|c| Line::from(format!("{} ({})", c.name, c.widgets.len())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.selected_category)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Categories "));

    f.render_widget(tabs, area);
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App) {
    let Some(category) = app.current_category() else {
        let empty = Paragraph::new("No widgets found")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    // Widget cards plus the trailing "Add Widget" card
    let total_cards = category.widgets.len() + 1;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = app.selected_widget / CARDS_PER_ROW;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = first_row + slot;
        if row * CARDS_PER_ROW >= total_cards {
            break;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW])
            .split(*row_area);

        for (col, cell) in columns.iter().enumerate() {
            let index = row * CARDS_PER_ROW + col;
            match category.widgets.get(index) {
                Some(widget) => draw_widget_card(f, *cell, widget, index == app.selected_widget),
                None if index == category.widgets.len() => draw_add_card(f, *cell),
                None => {}
            }
        }
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) => {
            let (tag, color) = match status.level {
                StatusLevel::Info => ("✓ ", Color::Green),
                StatusLevel::Warning => ("⚠ ", Color::Yellow),
            };
            Line::from(vec![
                Span::styled(tag, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(status.text.clone(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(
            format!(
                " {} categories, {} widgets",
                app.store.categories().len(),
                app.store.snapshot().widget_count()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let help_text = match app.input_mode {
        InputMode::Search => vec![
            Span::raw("type to filter  ["),
            Span::styled("Enter", key),
            Span::raw("] done  ["),
            Span::styled("Esc", key),
            Span::raw("] clear"),
        ],
        InputMode::Form => vec![
            Span::raw("["),
            Span::styled("Tab", key),
            Span::raw("] field  ["),
            Span::styled("◀▶", key),
            Span::raw("] chart type  ["),
            Span::styled("Enter", key),
            Span::raw("] add  ["),
            Span::styled("Esc", key),
            Span::raw("] cancel"),
        ],
        InputMode::Normal => vec![
            Span::raw("["),
            Span::styled("q", key),
            Span::raw("]uit ["),
            Span::styled("/", key),
            Span::raw("] search ["),
            Span::styled("←→", key),
            Span::raw("] category ["),
            Span::styled("↑↓", key),
            Span::raw("] widget ["),
            Span::styled("a", key),
            Span::raw("]dd ["),
            Span::styled("d", key),
            Span::raw("]elete ["),
            Span::styled("w", key),
            Span::raw("]idget catalog"),
        ],
    };

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}
