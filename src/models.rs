use crate::chart_type::ChartType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub categories: Vec<Category>,
}

impl Dashboard {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn widget_count(&self) -> usize {
        self.categories.iter().map(|c| c.widgets.len()).sum()
    }

    pub fn contains_widget(&self, widget_id: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.widgets.iter().any(|w| w.id == widget_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub name: String,
    #[serde(rename = "chartType")]
    pub chart_type: ChartType,
    pub data: ChartData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    /// Non-numeric entries are NaN in memory and `null` in JSON
    #[serde(rename = "data", with = "nan_as_null", default)]
    pub values: Vec<f64>,
    #[serde(rename = "backgroundColor", default)]
    pub colors: Vec<String>,
    #[serde(rename = "borderWidth", default)]
    pub border_width: f64,
}

/// One label of a widget's primary series, with whatever value and color sit at its index.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint<'a> {
    pub label: &'a str,
    pub value: Option<f64>,
    pub color: Option<&'a str>,
}

impl Widget {
    /// The first dataset drives both the chart and the legend.
    pub fn primary_dataset(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    pub fn series(&self) -> Vec<SeriesPoint<'_>> {
        let dataset = self.primary_dataset();
        self.data
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| SeriesPoint {
                label,
                value: dataset.and_then(|d| d.values.get(i).copied()),
                color: dataset.and_then(|d| d.colors.get(i).map(String::as_str)),
            })
            .collect()
    }
}

/// Render a value the way the legend and reports show it: integers without a
/// fractional part, everything else as-is, NaN and Infinity spelled out.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

mod nan_as_null {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            if value.is_finite() {
                seq.serialize_element(value)?;
            } else {
                seq.serialize_element(&Option::<f64>::None)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let raw = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_json() -> &'static str {
        r##"{
            "id": "w1",
            "name": "Cloud Accounts",
            "chartType": "Doughnut",
            "data": {
                "labels": ["Connected", "Not Connected", "Unknown"],
                "datasets": [{
                    "label": "Cloud Accounts",
                    "data": [2, null, 3.5],
                    "backgroundColor": ["#5984e0", "#e0e7ff"],
                    "borderWidth": 0
                }]
            }
        }"##
    }

    #[test]
    fn test_widget_deserialize() {
        let widget: Widget = serde_json::from_str(widget_json()).unwrap();
        assert_eq!(widget.chart_type, ChartType::Doughnut);
        let values = &widget.data.datasets[0].values;
        assert_eq!(values[0], 2.0);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 3.5);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let widget: Widget = serde_json::from_str(widget_json()).unwrap();
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["data"]["datasets"][0]["data"][1], serde_json::Value::Null);
        assert_eq!(json["chartType"], "Doughnut");
    }

    #[test]
    fn test_series_pairs_labels_with_values_and_colors() {
        let widget: Widget = serde_json::from_str(widget_json()).unwrap();
        let series = widget.series();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].label, "Connected");
        assert_eq!(series[0].value, Some(2.0));
        assert_eq!(series[0].color, Some("#5984e0"));
        // more labels than colors
        assert_eq!(series[2].color, None);
    }

    #[test]
    fn test_series_without_datasets() {
        let mut widget: Widget = serde_json::from_str(widget_json()).unwrap();
        widget.data.datasets.clear();
        let series = widget.series();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|p| p.value.is_none() && p.color.is_none()));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-12.0), "-12");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
    }
}
