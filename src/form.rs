use crate::chart_type::ChartType;
use crate::models::{ChartData, Dataset, Widget};
use crate::palette::colors_for;
use crate::store::{DashboardStore, StoreError};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Please fill in all the fields")]
    MissingFields,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Category `{0}` has no widgets to copy a chart type from; pick one")]
    ChartTypeRequired(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Values,
    ChartType,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Values,
            FormField::Values => FormField::ChartType,
            FormField::ChartType => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::ChartType,
            FormField::Values => FormField::Name,
            FormField::ChartType => FormField::Values,
        }
    }
}

/// Transient state of the "Add Widget" modal. The modal is open while a
/// target category is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetForm {
    pub name: String,
    pub raw_values: String,
    pub category_id: String,
    /// `None` copies the chart type of the category's first widget
    pub chart_type: Option<ChartType>,
    pub focus: FormField,
}

impl WidgetForm {
    pub fn open(&mut self, category_id: &str) {
        *self = Self {
            category_id: category_id.to_string(),
            ..Self::default()
        };
    }

    pub fn is_open(&self) -> bool {
        !self.category_id.is_empty()
    }

    pub fn focused_text(&self) -> Option<&str> {
        match self.focus {
            FormField::Name => Some(&self.name),
            FormField::Values => Some(&self.raw_values),
            FormField::ChartType => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Values => self.raw_values.push(c),
            FormField::ChartType => {}
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Values => {
                self.raw_values.pop();
            }
            FormField::ChartType => {}
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// inherit -> Bar -> Doughnut -> Pie -> inherit
    pub fn cycle_chart_type(&mut self) {
        self.chart_type = match &self.chart_type {
            None => Some(ChartType::Bar),
            Some(ChartType::Pie) | Some(ChartType::Other(_)) => None,
            Some(current) => Some(current.next()),
        };
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Validate, build the widget, hand it to the store and clear the form.
    /// On error nothing in the store changes and the form keeps its input.
    pub fn submit(&mut self, store: &mut DashboardStore, now: DateTime<Utc>) -> Result<String, FormError> {
        let result = self.try_submit(store, now);
        match &result {
            Ok(id) => {
                info!(widget = %id, category = %self.category_id, "widget created from form");
                self.cancel();
            }
            Err(e) => warn!(category = %self.category_id, "widget form rejected: {}", e),
        }
        result
    }

    fn try_submit(&self, store: &mut DashboardStore, now: DateTime<Utc>) -> Result<String, FormError> {
        if self.name.is_empty() || self.raw_values.is_empty() || self.category_id.is_empty() {
            return Err(FormError::MissingFields);
        }

        let category = store
            .category(&self.category_id)
            .ok_or(FormError::CategoryNotFound)?;

        let chart_type = match &self.chart_type {
            Some(explicit) => explicit.clone(),
            None => category
                .widgets
                .first()
                .map(|w| w.chart_type.clone())
                .ok_or_else(|| FormError::ChartTypeRequired(category.name.clone()))?,
        };

        let widget = build_widget(&self.name, &self.raw_values, chart_type, now);
        let id = widget.id.clone();
        store.add_widget(widget, &self.category_id)?;
        Ok(id)
    }
}

/// Split on commas. Tokens are trimmed, an empty token counts as zero and
/// anything that is not a number is kept as NaN.
pub fn parse_values(raw: &str) -> Vec<f64> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() {
                0.0
            } else {
                parse_number(token)
            }
        })
        .collect()
}

/// Decimal and exponent forms, unsigned `0x`/`0o`/`0b` integers, and a
/// spelled-out `Infinity`. Other words (`inf`, `nan`) are not numbers.
fn parse_number(token: &str) -> f64 {
    match token {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match token.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&token[2..], radix);
    }

    let unsigned = token.trim_start_matches(|c| c == '+' || c == '-');
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }

    token.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits
        .chars()
        .try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

pub fn build_widget(name: &str, raw_values: &str, chart_type: ChartType, now: DateTime<Utc>) -> Widget {
    let values = parse_values(raw_values);
    let labels = (1..=values.len()).map(|i| format!("Label{}", i)).collect();
    let colors = colors_for(values.len());

    Widget {
        id: format!("{}-{}", name, now.timestamp_millis()),
        name: name.to_string(),
        chart_type,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: name.to_string(),
                values,
                colors,
                border_width: 0.0,
            }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Dashboard};
    use crate::palette::PALETTE;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    fn store() -> DashboardStore {
        let existing = build_widget("Cloud Accounts", "2,2", ChartType::Doughnut, now());
        DashboardStore::new(Dashboard {
            categories: vec![
                Category {
                    id: "cspm".to_string(),
                    name: "CSPM".to_string(),
                    widgets: vec![existing],
                },
                Category {
                    id: "empty".to_string(),
                    name: "Empty".to_string(),
                    widgets: vec![],
                },
            ],
        })
    }

    fn filled(category_id: &str) -> WidgetForm {
        let mut form = WidgetForm::default();
        form.open(category_id);
        form.name = "Alerts".to_string();
        form.raw_values = "1,2,3".to_string();
        form
    }

    #[test]
    fn test_submit_builds_widget() {
        let mut store = store();
        let mut form = filled("cspm");

        let id = form.submit(&mut store, now()).unwrap();
        assert_eq!(id, "Alerts-1700000000123");

        let widget = store.category("cspm").unwrap().widgets.last().unwrap().clone();
        assert_eq!(widget.name, "Alerts");
        assert_eq!(widget.chart_type, ChartType::Doughnut);
        assert_eq!(widget.data.labels, vec!["Label1", "Label2", "Label3"]);

        let dataset = &widget.data.datasets[0];
        assert_eq!(dataset.label, "Alerts");
        assert_eq!(dataset.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(dataset.colors, PALETTE[..3].to_vec());
        assert_eq!(dataset.border_width, 0.0);

        assert_eq!(form, WidgetForm::default());
        assert!(!form.is_open());
    }

    #[test]
    fn test_blank_fields_leave_store_untouched() {
        let mut store = store();
        let before = store.snapshot();

        for blank in 0..3 {
            let mut form = filled("cspm");
            match blank {
                0 => form.name.clear(),
                1 => form.raw_values.clear(),
                _ => form.category_id.clear(),
            }

            let err = form.submit(&mut store, now()).unwrap_err();
            assert_eq!(err, FormError::MissingFields);
            assert_eq!(err.to_string(), "Please fill in all the fields");
        }

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_rejected_submit_keeps_input() {
        let mut store = store();
        let mut form = filled("cspm");
        form.raw_values.clear();

        form.submit(&mut store, now()).unwrap_err();
        assert_eq!(form.name, "Alerts");
        assert!(form.is_open());
    }

    #[test]
    fn test_unknown_category() {
        let mut store = store();
        let mut form = filled("missing");
        assert_eq!(form.submit(&mut store, now()), Err(FormError::CategoryNotFound));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_empty_category_needs_explicit_chart_type() {
        let mut store = store();
        let mut form = filled("empty");

        let err = form.submit(&mut store, now()).unwrap_err();
        assert_eq!(err, FormError::ChartTypeRequired("Empty".to_string()));

        form.cycle_chart_type();
        form.cycle_chart_type();
        assert_eq!(form.chart_type, Some(ChartType::Doughnut));

        form.submit(&mut store, now()).unwrap();
        let widgets = &store.category("empty").unwrap().widgets;
        assert_eq!(widgets[0].chart_type, ChartType::Doughnut);
    }

    #[test]
    fn test_explicit_chart_type_wins_over_inherited() {
        let mut store = store();
        let mut form = filled("cspm");
        form.chart_type = Some(ChartType::Bar);

        form.submit(&mut store, now()).unwrap();
        let widget = store.category("cspm").unwrap().widgets.last().unwrap();
        assert_eq!(widget.chart_type, ChartType::Bar);
    }

    #[test]
    fn test_duplicate_id_surfaces_store_error() {
        let mut store = store();
        filled("cspm").submit(&mut store, now()).unwrap();

        let mut again = filled("cspm");
        let err = again.submit(&mut store, now()).unwrap_err();
        assert!(matches!(err, FormError::Store(StoreError::DuplicateWidget(_))));
        assert!(again.is_open());
    }

    #[test]
    fn test_cancel_clears_without_touching_store() {
        let mut store = store();
        let mut form = filled("cspm");
        form.cancel();

        assert_eq!(form, WidgetForm::default());
        assert_eq!(store.version(), 0);
        assert_eq!(form.submit(&mut store, now()), Err(FormError::MissingFields));
    }

    #[test]
    fn test_parse_values_is_relaxed() {
        let values = parse_values("1, 2.5,,abc");
        assert_eq!(values[..3], [1.0, 2.5, 0.0]);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_parse_values_prefixed_integers_and_infinity() {
        let values = parse_values("0x10,0o17,0b101,Infinity,-Infinity,1e3,-2.5");
        assert_eq!(values, vec![16.0, 15.0, 5.0, f64::INFINITY, f64::NEG_INFINITY, 1000.0, -2.5]);
    }

    #[test]
    fn test_parse_values_rejects_words_and_bad_prefixes() {
        for token in ["inf", "-inf", "nan", "NaN", "infinity", "0x", "0xZZ", "-0x10", "0b102"] {
            assert!(parse_values(token)[0].is_nan(), "{} should not parse", token);
        }
    }

    #[test]
    fn test_chart_type_cycle_returns_to_inherit() {
        let mut form = WidgetForm::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            form.cycle_chart_type();
            seen.push(form.chart_type.clone());
        }
        assert_eq!(
            seen,
            vec![
                Some(ChartType::Bar),
                Some(ChartType::Doughnut),
                Some(ChartType::Pie),
                None
            ]
        );
    }

    #[test]
    fn test_editing_follows_focus() {
        let mut form = WidgetForm::default();
        form.open("cspm");
        form.insert_char('A');
        form.focus_next();
        form.insert_char('1');
        form.insert_char(',');
        form.delete_char();
        form.focus_next();
        form.insert_char('x');

        assert_eq!(form.name, "A");
        assert_eq!(form.raw_values, "1");
        assert_eq!(form.focused_text(), None);
        form.focus_previous();
        assert_eq!(form.focused_text(), Some("1"));
    }
}
