//! Launch records dashboard.
//!
//! A site picker (with an "all sites" option) and a payload range drive two
//! charts: launch outcomes per site, and payload against outcome.

use crate::dataset::{Aggregator, Dataset, Scalar, Schema};
use crate::error::{ComputationError, DashboardError};
use crate::reactive::{Domain, InputSnapshot, InputValue, ReactiveGraph, Selection};
use crate::view::{PieChart, ScatterChart, ScatterPoint, Slice, ViewModel};

pub const SITE_INPUT: &str = "site-dropdown";
pub const PAYLOAD_INPUT: &str = "payload-slider";

pub const SUCCESS_PIE: &str = "success-pie-chart";
pub const PAYLOAD_SCATTER: &str = "success-payload-scatter-chart";

pub const SITE: &str = "Launch Site";
pub const PAYLOAD: &str = "Payload Mass (kg)";
pub const CLASS: &str = "class";
pub const BOOSTER: &str = "Booster Version";

const SUCCESS: f64 = 1.0;
const FAILURE: f64 = 0.0;

pub fn schema() -> Schema {
    Schema::new()
        .category(SITE)
        .number(PAYLOAD)
        .number(CLASS)
        .category(BOOSTER)
}

/// Wire the dashboard's inputs and outputs into `graph`.
///
/// Site options are the distinct sites present in the dataset. The payload
/// range is bounded by, and initially set to, the observed payload extent.
pub fn install(graph: &mut ReactiveGraph<ViewModel>) -> Result<(), DashboardError> {
    let dataset = graph.dataset().clone();
    let sites = dataset.distinct(SITE)?;
    let (min, max) = dataset.min_max(PAYLOAD)?.unwrap_or((0.0, 0.0));

    graph.add_input(SITE_INPUT, Domain::with_all(sites), InputValue::All)?;
    graph.add_input(PAYLOAD_INPUT, Domain::range(min, max), InputValue::Range(min, max))?;

    graph.declare(SUCCESS_PIE, &[SITE_INPUT], success_pie)?;
    graph.declare(PAYLOAD_SCATTER, &[SITE_INPUT, PAYLOAD_INPUT], payload_scatter)?;
    Ok(())
}

/// All sites: successful launches per site. One site: success vs failure.
pub fn success_pie(dataset: &Dataset, inputs: &InputSnapshot) -> Result<ViewModel, ComputationError> {
    match inputs.selection(SITE_INPUT)? {
        Selection::All => {
            let successes = dataset
                .filter_eq(CLASS, &Scalar::from(SUCCESS))?
                .group_by_aggregate(&[SITE], CLASS, Aggregator::Sum)?;
            Ok(ViewModel::Pie(PieChart::from_groups(
                "Total successful launches count for all sites",
                &successes,
            )))
        }
        Selection::Value(site) => {
            let at_site = dataset.filter_eq(SITE, site)?;
            let success = at_site.filter_eq(CLASS, &Scalar::from(SUCCESS))?.len();
            let failed = at_site.filter_eq(CLASS, &Scalar::from(FAILURE))?.len();
            Ok(ViewModel::Pie(PieChart {
                title: format!("Success vs. Failed Launches at {site}"),
                slices: vec![
                    Slice {
                        label: "Success".into(),
                        value: success as f64,
                    },
                    Slice {
                        label: "Failed".into(),
                        value: failed as f64,
                    },
                ],
            }))
        }
        Selection::Unselected => Ok(ViewModel::Empty),
    }
}

/// Payload against outcome, coloured by booster version.
///
/// The payload range applies to every site selection, including "all".
pub fn payload_scatter(dataset: &Dataset, inputs: &InputSnapshot) -> Result<ViewModel, ComputationError> {
    let (low, high) = inputs.range(PAYLOAD_INPUT)?;
    let in_range = dataset.filter_range(PAYLOAD, low, high)?;

    let (rows, title) = match inputs.selection(SITE_INPUT)? {
        Selection::All => (in_range, "Correlation between payload and success for all sites".to_string()),
        Selection::Value(site) => (
            in_range.filter_eq(SITE, site)?,
            format!("Correlation between payload and success for {site}"),
        ),
        Selection::Unselected => return Ok(ViewModel::Empty),
    };

    let xs = rows.numbers(PAYLOAD)?;
    let ys = rows.numbers(CLASS)?;
    let boosters = rows.values(BOOSTER)?;
    let points = xs
        .into_iter()
        .zip(ys)
        .zip(boosters)
        .map(|((x, y), booster)| ScatterPoint {
            x,
            y,
            series: booster.to_string(),
        })
        .collect();

    Ok(ViewModel::Scatter(ScatterChart {
        title,
        x_label: PAYLOAD.to_string(),
        y_label: CLASS.to_string(),
        points,
    }))
}
