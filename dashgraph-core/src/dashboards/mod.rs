//! Dashboards
//!
//! Each dashboard contributes a dataset schema and an `install` function
//! that adds its inputs and declares its outputs on a reactive graph.

pub mod auto_sales;
pub mod launches;

use serde::{Deserialize, Serialize};

use crate::dataset::Schema;
use crate::error::DashboardError;
use crate::reactive::ReactiveGraph;
use crate::view::ViewModel;

/// The dashboards this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DashboardKind {
    /// Launch outcomes by site and payload.
    Launches,
    /// Automobile sales, yearly and during recessions.
    AutoSales,
}

impl DashboardKind {
    /// Columns the dashboard's dataset must provide.
    pub fn schema(self) -> Schema {
        match self {
            DashboardKind::Launches => launches::schema(),
            DashboardKind::AutoSales => auto_sales::schema(),
        }
    }

    pub fn install(self, graph: &mut ReactiveGraph<ViewModel>) -> Result<(), DashboardError> {
        match self {
            DashboardKind::Launches => launches::install(graph),
            DashboardKind::AutoSales => auto_sales::install(graph),
        }
    }
}
