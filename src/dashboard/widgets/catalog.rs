use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::models::Category;

/// Short tab label: the leading word of the category name.
fn tab_label(category: &Category) -> String {
    category
        .name
        .split_whitespace()
        .next()
        .unwrap_or(category.id.as_str())
        .to_string()
}

/// Sidebar listing every widget of one category, independent of the search filter.
pub fn draw_catalog(f: &mut Frame, area: Rect, categories: &[Category], active: usize) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Widget Catalog ")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(inner);

    let titles: Vec<Line> = categories.iter().map(|c| Line::from(tab_label(c))).collect();
    let tabs = Tabs::new(titles)
        .select(active)
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(tabs, chunks[0]);

    match categories.get(active).filter(|c| !c.widgets.is_empty()) {
        Some(category) => {
            let items: Vec<ListItem> = category
                .widgets
                .iter()
                .map(|w| ListItem::new(format!(" • {}", w.name)))
                .collect();
            f.render_widget(List::new(items), chunks[1]);
        }
        None => {
            let empty = Paragraph::new("No Widgets Available")
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(empty, chunks[1]);
        }
    }

    let hint = Paragraph::new("[Tab] next tab  [w] close").style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_label_uses_leading_word() {
        let category = Category {
            id: "registry-scan".to_string(),
            name: "Registry Scan".to_string(),
            widgets: vec![],
        };
        assert_eq!(tab_label(&category), "Registry");

        let unnamed = Category {
            name: "  ".to_string(),
            ..category
        };
        assert_eq!(tab_label(&unnamed), "registry-scan");
    }
}
