use crate::models::{format_value, Category, Widget};
use anyhow::Result;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use std::collections::BTreeMap;

/// Sum of the finite values of the widget's first dataset.
fn widget_total(widget: &Widget) -> f64 {
    widget
        .primary_dataset()
        .map(|d| d.values.iter().filter(|v| v.is_finite()).sum())
        .unwrap_or(0.0)
}

fn widget_values(widget: &Widget) -> String {
    widget
        .primary_dataset()
        .map(|d| {
            d.values
                .iter()
                .map(|v| format_value(*v))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

pub fn format_table(categories: &[Category], show_summary: bool) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    table.set_titles(Row::new(vec![
        Cell::new("Category").style_spec("bFc"),
        Cell::new("Widget").style_spec("bFc"),
        Cell::new("Chart").style_spec("bFc"),
        Cell::new("Labels").style_spec("bFc"),
        Cell::new("Values").style_spec("bFc"),
        Cell::new("Total").style_spec("bFc"),
    ]));

    let mut total_widgets = 0;

    for category in categories {
        if category.widgets.is_empty() {
            table.add_row(Row::new(vec![
                Cell::new(&category.name),
                Cell::new("(no widgets)").style_spec("Fd"),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ]));
            continue;
        }

        for widget in &category.widgets {
            total_widgets += 1;
            let chart_cell = if widget.chart_type.is_renderable() {
                Cell::new(&widget.chart_type.to_string())
            } else {
                Cell::new(&widget.chart_type.to_string()).style_spec("Fy")
            };

            table.add_row(Row::new(vec![
                Cell::new(&category.name),
                Cell::new(&widget.name),
                chart_cell,
                Cell::new(&widget.data.labels.len().to_string()),
                Cell::new(&widget_values(widget)),
                Cell::new(&format_value(widget_total(widget))).style_spec("Fg"),
            ]));
        }
    }

    if show_summary {
        table.add_empty_row();
        table.add_row(Row::new(vec![
            Cell::new("TOTAL").style_spec("bFy"),
            Cell::new(&format!("{} widgets", total_widgets)).style_spec("bFy"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
        ]));
    }

    table.to_string()
}

pub fn format_csv(categories: &[Category]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Category ID", "Category", "Widget ID", "Widget", "Chart", "Label", "Value", "Color"])?;

    for category in categories {
        for widget in &category.widgets {
            for point in widget.series() {
                let value = point.value.map(format_value).unwrap_or_default();
                writer.write_record([
                    category.id.as_str(),
                    category.name.as_str(),
                    widget.id.as_str(),
                    widget.name.as_str(),
                    widget.chart_type.as_tag(),
                    point.label,
                    value.as_str(),
                    point.color.unwrap_or(""),
                ])?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn format_json(categories: &[Category]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({ "categories": categories }))
}

pub fn format_markdown(categories: &[Category], show_summary: bool) -> String {
    let mut md = String::new();

    for category in categories {
        md.push_str(&format!("## {}\n\n", category.name));

        if category.widgets.is_empty() {
            md.push_str("_No widgets_\n\n");
            continue;
        }

        md.push_str("| Widget | Chart | Labels | Values | Total |\n");
        md.push_str("|--------|-------|--------|--------|-------|\n");
        for widget in &category.widgets {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                widget.name,
                widget.chart_type.as_tag(),
                widget.data.labels.join(", "),
                widget_values(widget),
                format_value(widget_total(widget)),
            ));
        }
        md.push('\n');
    }

    if show_summary {
        let widgets: usize = categories.iter().map(|c| c.widgets.len()).sum();
        md.push_str(&format!(
            "**{} categories, {} widgets**\n",
            categories.len(),
            widgets
        ));
    }

    md
}

pub fn print_summary(categories: &[Category]) {
    println!("\n{}", "=== Dashboard Summary ===".bright_cyan().bold());

    let total_widgets: usize = categories.iter().map(|c| c.widgets.len()).sum();
    println!("\n{}", "Overall:".yellow());
    println!("  Categories: {}", categories.len().to_string().green());
    println!("  Widgets: {}", total_widgets.to_string().green());

    let mut by_chart: BTreeMap<String, usize> = BTreeMap::new();
    for widget in categories.iter().flat_map(|c| &c.widgets) {
        *by_chart.entry(widget.chart_type.as_tag().to_string()).or_insert(0) += 1;
    }

    println!("\n{}", "By Chart Type:".yellow());
    for (chart, count) in by_chart {
        println!("  {}: {}", chart.bright_blue(), count);
    }

    println!("\n{}", "By Category:".yellow());
    for category in categories {
        println!("  {} ({}): {}", category.name.bright_blue(), category.id, category.widgets.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_type::ChartType;
    use crate::form::build_widget;
    use chrono::Utc;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "infra".to_string(),
                name: "Infrastructure".to_string(),
                widgets: vec![
                    build_widget("CPU Usage", "1,2,x", ChartType::Bar, Utc::now()),
                    build_widget("Disk", "4", ChartType::Other("Radar".to_string()), Utc::now()),
                ],
            },
            Category {
                id: "empty".to_string(),
                name: "Empty".to_string(),
                widgets: vec![],
            },
        ]
    }

    #[test]
    fn test_widget_total_skips_nan() {
        let categories = categories();
        assert_eq!(widget_total(&categories[0].widgets[0]), 3.0);
        assert_eq!(widget_values(&categories[0].widgets[0]), "1, 2, NaN");
    }

    #[test]
    fn test_table_lists_every_widget() {
        let table = format_table(&categories(), true);
        assert!(table.contains("CPU Usage"));
        assert!(table.contains("Radar (unsupported)"));
        assert!(table.contains("(no widgets)"));
        assert!(table.contains("2 widgets"));
    }

    #[test]
    fn test_csv_has_one_row_per_label() {
        let csv = format_csv(&categories()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + 3 + 1);
        assert!(lines[1].starts_with("infra,Infrastructure,CPU Usage-"));
        assert!(lines[1].ends_with(",Bar,Label1,1,#FA8072"));
        assert!(lines[3].contains(",Label3,NaN,"));
    }

    #[test]
    fn test_json_keeps_seed_shape() {
        let json = format_json(&categories()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let widget = &value["categories"][0]["widgets"][0];
        assert_eq!(widget["chartType"], "Bar");
        assert_eq!(widget["data"]["datasets"][0]["data"][2], serde_json::Value::Null);
    }

    #[test]
    fn test_markdown_sections() {
        let md = format_markdown(&categories(), true);
        assert!(md.contains("## Infrastructure"));
        assert!(md.contains("| CPU Usage | Bar | Label1, Label2, Label3 | 1, 2, NaN | 3 |"));
        assert!(md.contains("_No widgets_"));
        assert!(md.contains("**2 categories, 2 widgets**"));
    }
}
