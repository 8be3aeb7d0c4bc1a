//! Dashgraph Core
//!
//! This crate provides the runtime for small, data-driven dashboards.
//! It implements:
//!
//! - An immutable, columnar dataset with filtering and grouped aggregation
//! - A reactive graph of named inputs and outputs with static dependencies
//! - Minimal, cached recomputation of outputs on input change
//! - Render sinks that deliver view models to a presentation layer
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `dataset`: Loading, filtering and aggregating tabular data
//! - `graph`: The bipartite input/output dependency graph
//! - `reactive`: Inputs, snapshots, view functions and output slots
//! - `dashboards`: The concrete launch and auto-sales dashboards
//! - `context`: The shared dashboard context and its dispatch loop
//! - `sink`: Render sinks for collected, JSON and MessagePack frames
//!
//! # Example
//!
//! ```rust,ignore
//! use dashgraph_core::dashboards::launches;
//! use dashgraph_core::reactive::InputValue;
//! use dashgraph_core::sink::CollectingSink;
//! use dashgraph_core::DashboardContext;
//!
//! let context = DashboardContext::new(dataset, |graph| launches::install(graph))?;
//! let mut sink = CollectingSink::new();
//!
//! // First paint
//! context.render_all(&mut sink)?;
//!
//! // Only the payload scatter chart reads the slider
//! context.dispatch(launches::PAYLOAD_INPUT, InputValue::Range(0.0, 5000.0), &mut sink)?;
//! ```

pub mod config;
pub mod context;
pub mod dashboards;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod reactive;
pub mod sink;
pub mod view;

pub use config::{DashboardConfig, OutputFormat};
pub use context::DashboardContext;
pub use dataset::Dataset;
pub use error::DashboardError;
pub use reactive::{InputValue, ReactiveGraph};
pub use view::ViewModel;
