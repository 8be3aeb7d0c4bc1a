//! View Models
//!
//! Chart descriptions produced by the dashboards' view functions. They carry
//! data and labels only; drawing them is the render sink's job.

use serde::{Deserialize, Serialize};

use crate::dataset::{Group, Scalar};

/// What an output slot displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewModel {
    /// Nothing to show, e.g. while a picker is still on its placeholder.
    Empty,
    /// A property of another control, such as whether it is disabled.
    Control(ControlState),
    Pie(PieChart),
    Scatter(ScatterChart),
    Line(LineChart),
    Bar(BarChart),
    Grid(Grid),
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewModel::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl PieChart {
    /// One slice per group, labelled by the group key.
    pub fn from_groups(title: impl Into<String>, groups: &[Group]) -> Self {
        Self {
            title: title.into(),
            slices: groups
                .iter()
                .map(|g| Slice {
                    label: g.label(),
                    value: g.value,
                })
                .collect(),
        }
    }

    /// Slice value by label.
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub series: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: Scalar,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<LinePoint>,
}

impl LineChart {
    /// One point per group; x is the first key component.
    pub fn from_groups(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        groups: &[Group],
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points: groups
                .iter()
                .filter_map(|g| {
                    g.key.first().map(|x| LinePoint {
                        x: x.clone(),
                        y: g.value,
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub x: Scalar,
    pub y: f64,
    /// Colour grouping, if the chart has one.
    pub series: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// One bar per group. The first key component is the x position, the
    /// second (if any) the series.
    pub fn from_groups(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        groups: &[Group],
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bars: groups
                .iter()
                .filter_map(|g| {
                    g.key.first().map(|x| Bar {
                        x: x.clone(),
                        y: g.value,
                        series: g.key.get(1).map(ToString::to_string),
                    })
                })
                .collect(),
        }
    }
}

/// Charts laid out in rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: Vec<Vec<ViewModel>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Aggregator;
    use crate::dataset::fixtures;

    #[test]
    fn pie_from_groups() {
        let groups = fixtures::abc()
            .group_by_aggregate(&["category"], "amount", Aggregator::Sum)
            .unwrap();
        let pie = PieChart::from_groups("totals", &groups);
        assert_eq!(pie.value_of("A"), Some(30.0));
        assert_eq!(pie.value_of("B"), Some(30.0));
        assert_eq!(pie.value_of("C"), None);
    }

    #[test]
    fn views_serialize_with_kind_tag() {
        let view = ViewModel::Control(ControlState { disabled: true });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "control", "disabled": true }));

        let json = serde_json::to_value(ViewModel::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "empty" }));
    }

    #[test]
    fn grid_round_trips_through_json() {
        let view = ViewModel::Grid(Grid {
            rows: vec![vec![
                ViewModel::Empty,
                ViewModel::Pie(PieChart {
                    title: "t".into(),
                    slices: vec![Slice { label: "a".into(), value: 1.0 }],
                }),
            ]],
        });
        let json = serde_json::to_string(&view).unwrap();
        let back: ViewModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
