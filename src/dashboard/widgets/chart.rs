use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block,
    },
    Frame,
};
use std::f64::consts::TAU;

use super::terminal_color;
use crate::chart_type::ChartType;
use crate::models::{format_value, Widget};

// Braille canvas resolution per unit of radius
const ARC_STEPS: usize = 80;
const DOUGHNUT_HOLE: f64 = 0.55;

/// Draw the chart matching the widget's type. Unknown types draw nothing.
pub fn draw_chart(f: &mut Frame, area: Rect, widget: &Widget) {
    match &widget.chart_type {
        ChartType::Bar => draw_bar_chart(f, area, widget),
        ChartType::Doughnut => draw_arc_chart(f, area, widget, DOUGHNUT_HOLE),
        ChartType::Pie => draw_arc_chart(f, area, widget, 0.0),
        ChartType::Other(_) => {}
    }
}

fn draw_bar_chart(f: &mut Frame, area: Rect, widget: &Widget) {
    let series = widget.series();
    if series.is_empty() {
        return;
    }

    let values: Vec<Option<f64>> = series.iter().map(|p| p.value).collect();
    let heights = bar_heights(&values);

    let bars: Vec<Bar> = series
        .iter()
        .zip(heights)
        .map(|(point, height)| {
            let color = terminal_color(point.color);
            let shown = point.value.map(format_value).unwrap_or_default();
            Bar::default()
                .label(Line::from(point.label.to_string()))
                .value(height)
                .text_value(shown)
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let width = bar_width(area.width, series.len());
    let chart = BarChart::default()
        .block(Block::default())
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(1);

    f.render_widget(chart, area);
}

/// Largest bar height handed to the bar chart.
pub const BAR_SCALE: f64 = 10_000.0;

/// Integer bar heights scaled against the largest drawable value, so any
/// finite input stays within `BAR_SCALE`. Negative and non-finite values
/// draw as empty bars.
pub fn bar_heights(values: &[Option<f64>]) -> Vec<u64> {
    let drawable = |v: &Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
    let max = values.iter().filter_map(drawable).fold(0.0_f64, f64::max);

    values
        .iter()
        .map(|v| match drawable(v) {
            Some(v) if max > 0.0 => (v / max * BAR_SCALE).round() as u64,
            _ => 0,
        })
        .collect()
}

/// Per-bar width for `count` bars with a one-cell gap, between 1 and 9 cells.
pub fn bar_width(area_width: u16, count: usize) -> u16 {
    let width = usize::from(area_width) / count.max(1);
    u16::try_from(width).unwrap_or(u16::MAX).saturating_sub(1).clamp(1, 9)
}

/// Start/end angles (radians, clockwise from 12 o'clock) for each value.
/// Values that can't be drawn get `None` and take up no room.
pub fn slice_angles(values: &[Option<f64>]) -> Vec<Option<(f64, f64)>> {
    let weight = |v: &Option<f64>| match v {
        Some(v) if v.is_finite() && *v > 0.0 => Some(*v),
        _ => None,
    };
    let total: f64 = values.iter().filter_map(weight).sum();

    let mut start = 0.0;
    values
        .iter()
        .map(|v| {
            let value = weight(v)?;
            if total <= 0.0 {
                return None;
            }
            let end = start + value / total * TAU;
            let slice = (start, end);
            start = end;
            Some(slice)
        })
        .collect()
}

fn draw_arc_chart(f: &mut Frame, area: Rect, widget: &Widget, hole: f64) {
    let series = widget.series();
    let values: Vec<Option<f64>> = series.iter().map(|p| p.value).collect();
    let angles = slice_angles(&values);

    let mut slices: Vec<(Color, Vec<(f64, f64)>)> = series
        .iter()
        .map(|p| (terminal_color(p.color), Vec::new()))
        .collect();

    // Sample the unit disc on a grid and bucket each point into its slice.
    for xi in 0..=ARC_STEPS * 2 {
        for yi in 0..=ARC_STEPS * 2 {
            let x = xi as f64 / ARC_STEPS as f64 - 1.0;
            let y = yi as f64 / ARC_STEPS as f64 - 1.0;
            let r = (x * x + y * y).sqrt();
            if r > 1.0 || r < hole {
                continue;
            }

            let theta = x.atan2(y).rem_euclid(TAU);
            let slice = angles
                .iter()
                .position(|a| matches!(a, Some((start, end)) if theta >= *start && theta < *end));
            if let Some(i) = slice {
                slices[i].1.push((x, y));
            }
        }
    }

    // Terminal cells are about twice as tall as they are wide.
    let aspect = (area.width as f64 / (area.height.max(1) as f64 * 2.0)).max(1.0);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (color, coords) in &slices {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });

    f.render_widget(canvas, area);
}
