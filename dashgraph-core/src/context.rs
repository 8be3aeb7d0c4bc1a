//! Dashboard Context
//!
//! The context owns everything a running dashboard needs: the dataset and
//! the reactive graph built over it. It is constructed once at startup and
//! passed explicitly to whatever serves the render sink.
//!
//! The graph sits behind a mutex, so input events from several callers are
//! applied one at a time and each runs to completion, recomputation and
//! delivery included, before the next starts.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, trace};

use crate::config::DashboardConfig;
use crate::dataset::{self, Dataset};
use crate::error::DashboardError;
use crate::reactive::{InputValue, ReactiveGraph};
use crate::sink::RenderSink;
use crate::view::ViewModel;

pub struct DashboardContext<V = ViewModel> {
    dataset: Arc<Dataset>,
    graph: Mutex<ReactiveGraph<V>>,
}

impl<V: 'static> DashboardContext<V> {
    /// Build a context over `dataset`; `setup` adds inputs and declares
    /// outputs.
    pub fn new<F>(dataset: Dataset, setup: F) -> Result<Self, DashboardError>
    where
        F: FnOnce(&mut ReactiveGraph<V>) -> Result<(), DashboardError>,
    {
        let dataset = Arc::new(dataset);
        let mut graph = ReactiveGraph::new(Arc::clone(&dataset));
        setup(&mut graph)?;
        Ok(Self {
            dataset,
            graph: Mutex::new(graph),
        })
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Compute every output and deliver it. Used for the first paint.
    pub fn render_all(&self, sink: &mut dyn RenderSink<V>) -> Result<Vec<String>, DashboardError> {
        let mut graph = self.graph.lock();
        let outputs = graph.refresh_all()?;
        deliver(&graph, &outputs, sink)?;
        Ok(outputs)
    }

    /// Apply one input change and deliver the views it affected.
    pub fn dispatch(
        &self,
        input: &str,
        value: InputValue,
        sink: &mut dyn RenderSink<V>,
    ) -> Result<Vec<String>, DashboardError> {
        let mut graph = self.graph.lock();
        let outputs = graph.set_input(input, value)?;
        deliver(&graph, &outputs, sink)?;
        Ok(outputs)
    }

    /// Read access to the graph.
    pub fn with_graph<R>(&self, f: impl FnOnce(&ReactiveGraph<V>) -> R) -> R {
        f(&self.graph.lock())
    }
}

impl DashboardContext<ViewModel> {
    /// Load the configured dataset, install the configured dashboard and
    /// apply any initial input values.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let dataset = dataset::load(&config.source, &config.dashboard.schema())?;
        let kind = config.dashboard;
        let context = Self::new(dataset, |graph| kind.install(graph))?;
        {
            let mut graph = context.graph.lock();
            for (input, value) in &config.initial {
                graph.set_input(input, value.clone())?;
            }
        }
        info!(dashboard = ?kind, rows = context.dataset.len(), "dashboard ready");
        Ok(context)
    }
}

fn deliver<V: 'static>(
    graph: &ReactiveGraph<V>,
    outputs: &[String],
    sink: &mut dyn RenderSink<V>,
) -> Result<(), DashboardError> {
    for output in outputs {
        if let Some(view) = graph.view(output) {
            sink.deliver(output, view)?;
            trace!(output = %output, "view delivered");
        }
    }
    sink.flush()?;
    Ok(())
}
