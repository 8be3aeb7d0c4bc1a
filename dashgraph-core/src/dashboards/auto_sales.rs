//! Automobile sales dashboard.
//!
//! A report picker chooses between yearly and recession statistics; a year
//! picker, enabled only for the yearly report, narrows the yearly charts.

use crate::dataset::{Aggregator, Dataset, DatasetView, Scalar, Schema};
use crate::error::{ComputationError, DashboardError};
use crate::reactive::{Domain, InputSnapshot, InputValue, ReactiveGraph, Selection};
use crate::view::{BarChart, ControlState, Grid, LineChart, PieChart, ViewModel};

pub const REPORT_INPUT: &str = "dropdown-statistics";
pub const YEAR_INPUT: &str = "select-year";

/// Whether the year picker is disabled.
pub const YEAR_PICKER_STATE: &str = "select-year.disabled";
pub const REPORT_OUTPUT: &str = "output";

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const RECESSION: &str = "Recession";
pub const SALES: &str = "Automobile_Sales";
pub const ADVERTISING: &str = "Advertising_Expenditure";
pub const VEHICLE_TYPE: &str = "Vehicle_Type";
pub const UNEMPLOYMENT: &str = "unemployment_rate";

/// Years offered by the year picker.
pub const YEARS: std::ops::RangeInclusive<i32> = 1980..=2023;

pub fn schema() -> Schema {
    Schema::new()
        .number(YEAR)
        .category(MONTH)
        .number(RECESSION)
        .number(SALES)
        .number(ADVERTISING)
        .category(VEHICLE_TYPE)
        .number(UNEMPLOYMENT)
}

/// The report families the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Yearly,
    Recession,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Yearly, ReportKind::Recession];

    /// Label shown in the report picker.
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Yearly => "Yearly Statistics",
            ReportKind::Recession => "Recession Period Statistics",
        }
    }

    /// The report a picker selection names, if any.
    pub fn from_selection(selection: Selection<'_>) -> Option<Self> {
        match selection {
            Selection::Value(Scalar::Text(label)) => Self::ALL.into_iter().find(|k| k.label() == label.as_str()),
            _ => None,
        }
    }

    /// Build the report. `year` is only consulted by the yearly report,
    /// which has nothing to show until a year is picked.
    pub fn render(self, dataset: &Dataset, year: Option<&Scalar>) -> Result<ViewModel, ComputationError> {
        match (self, year) {
            (ReportKind::Recession, _) => recession_report(dataset),
            (ReportKind::Yearly, Some(year)) => yearly_report(dataset, year),
            (ReportKind::Yearly, None) => Ok(ViewModel::Empty),
        }
    }
}

pub fn install(graph: &mut ReactiveGraph<ViewModel>) -> Result<(), DashboardError> {
    graph.add_input(
        REPORT_INPUT,
        Domain::with_placeholder(ReportKind::ALL.map(ReportKind::label)),
        InputValue::Unselected,
    )?;
    graph.add_input(YEAR_INPUT, Domain::with_placeholder(YEARS), InputValue::Unselected)?;

    graph.declare(YEAR_PICKER_STATE, &[REPORT_INPUT], year_picker_state)?;
    graph.declare(REPORT_OUTPUT, &[YEAR_INPUT, REPORT_INPUT], report)?;
    Ok(())
}

/// The year picker is enabled only for the yearly report.
pub fn year_picker_state(_: &Dataset, inputs: &InputSnapshot) -> Result<ViewModel, ComputationError> {
    let kind = ReportKind::from_selection(inputs.selection(REPORT_INPUT)?);
    Ok(ViewModel::Control(ControlState {
        disabled: kind != Some(ReportKind::Yearly),
    }))
}

pub fn report(dataset: &Dataset, inputs: &InputSnapshot) -> Result<ViewModel, ComputationError> {
    let Some(kind) = ReportKind::from_selection(inputs.selection(REPORT_INPUT)?) else {
        return Ok(ViewModel::Empty);
    };
    let year = match inputs.selection(YEAR_INPUT)? {
        Selection::Value(year) => Some(year),
        Selection::All | Selection::Unselected => None,
    };
    kind.render(dataset, year)
}

fn recession_report(dataset: &Dataset) -> Result<ViewModel, ComputationError> {
    let recession = dataset.filter_eq(RECESSION, &Scalar::from(1.0))?;

    let by_year = LineChart::from_groups(
        "Average Automobile Sales fluctuation over Recession Period",
        YEAR,
        SALES,
        &recession.group_by_aggregate(&[YEAR], SALES, Aggregator::Mean)?,
    );
    let by_vehicle = LineChart::from_groups(
        "Average Automobile Sales by vehicle type during recessions",
        VEHICLE_TYPE,
        SALES,
        &recession.group_by_aggregate(&[VEHICLE_TYPE], SALES, Aggregator::Mean)?,
    );
    let ad_share = advertising_share(
        &recession,
        "Total advertising expenditure share by vehicle type during recessions",
    )?;
    let unemployment = BarChart::from_groups(
        "Effect of unemployment rate on vehicle type and sales",
        UNEMPLOYMENT,
        SALES,
        &recession.group_by_aggregate(&[UNEMPLOYMENT, VEHICLE_TYPE], SALES, Aggregator::Sum)?,
    );

    Ok(ViewModel::Grid(Grid {
        rows: vec![
            vec![ViewModel::Line(by_year), ad_share],
            vec![ViewModel::Line(by_vehicle), ViewModel::Bar(unemployment)],
        ],
    }))
}

fn yearly_report(dataset: &Dataset, year: &Scalar) -> Result<ViewModel, ComputationError> {
    let in_year = dataset.filter_eq(YEAR, year)?;

    let over_years = LineChart::from_groups(
        "Automobile sales over year",
        YEAR,
        SALES,
        &dataset.group_by_aggregate(&[YEAR], SALES, Aggregator::Mean)?,
    );
    let by_month = LineChart::from_groups(
        format!("Monthly automobile sales in {year}"),
        MONTH,
        SALES,
        &in_year.group_by_aggregate(&[MONTH], SALES, Aggregator::Mean)?,
    );
    let by_vehicle = BarChart::from_groups(
        format!("Average Vehicles Sold by Vehicle Type in the year {year}"),
        VEHICLE_TYPE,
        SALES,
        &in_year.group_by_aggregate(&[VEHICLE_TYPE], SALES, Aggregator::Mean)?,
    );
    let ad_share = advertising_share(
        &in_year,
        &format!("Total Advertisement Expenditure for each vehicle in the year {year}"),
    )?;

    Ok(ViewModel::Grid(Grid {
        rows: vec![
            vec![ViewModel::Line(over_years), ViewModel::Line(by_month)],
            vec![ViewModel::Bar(by_vehicle), ad_share],
        ],
    }))
}

fn advertising_share(rows: &DatasetView<'_>, title: &str) -> Result<ViewModel, ComputationError> {
    let groups = rows.group_by_aggregate(&[VEHICLE_TYPE], ADVERTISING, Aggregator::Sum)?;
    Ok(ViewModel::Pie(PieChart::from_groups(title, &groups)))
}
