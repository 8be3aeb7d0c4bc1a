use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use dashgraph_core::dashboards::DashboardKind;
use dashgraph_core::dataset::DataSource;
use dashgraph_core::error::GraphError;
use dashgraph_core::reactive::InputEvent;
use dashgraph_core::sink::{JsonLinesSink, MsgPackSink, RenderSink};
use dashgraph_core::{DashboardConfig, DashboardContext, DashboardError, OutputFormat, ViewModel};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dashgraph",
    about = "Serve a reactive dashboard over stdin/stdout",
    version
)]
struct Opts {
    /// Dashboard config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dashboard to run when no config file is given
    #[arg(long, value_enum)]
    dashboard: Option<DashboardKind>,

    /// CSV path or http(s) URL; overrides the config's source
    #[arg(long, env = "DASHGRAPH_SOURCE")]
    source: Option<DataSource>,

    /// Frame encoding on stdout; overrides the config's format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl Opts {
    fn into_config(self) -> anyhow::Result<DashboardConfig> {
        let mut config = match (self.config, self.dashboard, self.source.clone()) {
            (Some(path), _, _) => DashboardConfig::from_file(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            (None, Some(dashboard), Some(source)) => DashboardConfig {
                dashboard,
                source,
                format: OutputFormat::default(),
                initial: Default::default(),
            },
            (None, _, _) => bail!("either --config or both --dashboard and --source are required"),
        };
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(dashboard) = self.dashboard {
            config.dashboard = dashboard;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Opts::parse().into_config()?;
    info!(dashboard = ?config.dashboard, source = %config.source, "starting dashboard");

    let context = DashboardContext::from_config(&config)?;

    let stdout = io::stdout();
    let mut sink: Box<dyn RenderSink<ViewModel>> = match config.format {
        OutputFormat::Json => Box::new(JsonLinesSink::new(stdout.lock())),
        OutputFormat::MsgPack => Box::new(MsgPackSink::new(stdout.lock())),
    };

    context.render_all(sink.as_mut())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading input events")?;
        if line.trim().is_empty() {
            continue;
        }
        let event: InputEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "skipping malformed event");
                continue;
            }
        };
        match context.dispatch(&event.input, event.value, sink.as_mut()) {
            Ok(_) => {}
            Err(DashboardError::Graph(
                e @ (GraphError::UnknownInput(_) | GraphError::OutOfDomain { .. }),
            )) => warn!(error = %e, "event rejected"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
