use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartType {
    Bar,
    Doughnut,
    Pie,

    // Forward compatibility: unknown tags survive a load and render nothing
    Other(String),
}

impl ChartType {
    /// Parse a seed-document tag. Tags are case-sensitive.
    pub fn from_tag(s: &str) -> Self {
        match s {
            "Bar" => ChartType::Bar,
            "Doughnut" => ChartType::Doughnut,
            "Pie" => ChartType::Pie,
            _ => ChartType::Other(s.to_string()),
        }
    }

    /// The tag written back to JSON
    pub fn as_tag(&self) -> &str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Doughnut => "Doughnut",
            ChartType::Pie => "Pie",
            ChartType::Other(s) => s,
        }
    }

    /// Whether the renderer has a chart for this tag
    pub fn is_renderable(&self) -> bool {
        !matches!(self, ChartType::Other(_))
    }

    /// Cycle through the renderable types. Unknown tags restart at `Bar`.
    pub fn next(&self) -> Self {
        match self {
            ChartType::Bar => ChartType::Doughnut,
            ChartType::Doughnut => ChartType::Pie,
            ChartType::Pie | ChartType::Other(_) => ChartType::Bar,
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Other(s) => write!(f, "{} (unsupported)", s),
            other => write!(f, "{}", other.as_tag()),
        }
    }
}

impl FromStr for ChartType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ChartType::from_tag(s))
    }
}

impl TryFrom<String> for ChartType {
    type Error = std::convert::Infallible;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(ChartType::from_tag(&s))
    }
}

impl From<ChartType> for String {
    fn from(chart_type: ChartType) -> String {
        chart_type.as_tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(ChartType::from_tag("Bar"), ChartType::Bar);
        assert_eq!(ChartType::from_tag("Doughnut"), ChartType::Doughnut);
        assert_eq!(ChartType::from_tag("Pie"), ChartType::Pie);
        assert_eq!(ChartType::from_tag("bar"), ChartType::Other("bar".to_string()));
        assert_eq!(ChartType::from_tag("Radar"), ChartType::Other("Radar".to_string()));
    }

    #[test]
    fn test_unknown_tag_is_not_renderable() {
        assert!(ChartType::Pie.is_renderable());
        assert!(!ChartType::Other("Line".to_string()).is_renderable());
    }

    #[test]
    fn test_cycle_visits_renderable_types() {
        assert_eq!(ChartType::Bar.next(), ChartType::Doughnut);
        assert_eq!(ChartType::Doughnut.next(), ChartType::Pie);
        assert_eq!(ChartType::Pie.next(), ChartType::Bar);
        assert_eq!(ChartType::Other("Line".to_string()).next(), ChartType::Bar);
    }

    #[test]
    fn test_unknown_tag_survives_serde() {
        let parsed: ChartType = serde_json::from_str("\"Radar\"").unwrap();
        assert_eq!(parsed, ChartType::Other("Radar".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Radar\"");
    }
}
