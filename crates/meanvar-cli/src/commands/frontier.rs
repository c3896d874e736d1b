//! Frontier command implementation.
//!
//! Samples `(return, volatility)` along the fully invested line between the
//! two assets and optionally renders it as an HTML chart.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use meanvar_core::analytics::min_variance_portfolio;
use meanvar_core::{AnalyticsResult, AssetStatistics, FrontierPoint, PortfolioEngine};

use crate::cli::{DataOptions, OutputFormat};
use crate::commands::build_analyzer;
use crate::error::CliError;
use crate::output::{percent_value, print_header, print_output, print_success};

/// Arguments for the frontier command.
#[derive(Args, Debug)]
pub struct FrontierArgs {
    /// First ticker (e.g. AAPL)
    pub first: String,

    /// Second ticker (e.g. MSFT)
    pub second: String,

    /// Write an HTML scatter chart of the frontier to this path
    #[arg(long, value_name = "FILE")]
    pub plot: Option<PathBuf>,
}

/// One frontier sample in percent, rounded to 2 decimals.
#[derive(Debug, Clone, Serialize, Tabled)]
struct FrontierRow {
    #[tabled(rename = "Weight 1", display_with = "display_percent")]
    first_weight: Decimal,
    #[tabled(rename = "Weight 2", display_with = "display_percent")]
    second_weight: Decimal,
    #[tabled(rename = "Return", display_with = "display_percent")]
    expected_return: Decimal,
    #[tabled(rename = "Volatility", display_with = "display_percent")]
    volatility: Decimal,
}

fn display_percent(value: &Decimal) -> String {
    format!("{:.2}%", value)
}

impl TryFrom<&FrontierPoint> for FrontierRow {
    type Error = anyhow::Error;

    fn try_from(point: &FrontierPoint) -> Result<Self> {
        let pct = |value: f64| {
            percent_value(value)
                .ok_or_else(|| anyhow::anyhow!("value {} is not representable", value))
        };
        Ok(Self {
            first_weight: pct(point.weights.a)?,
            second_weight: pct(point.weights.b)?,
            expected_return: pct(point.expected_return)?,
            volatility: pct(point.volatility)?,
        })
    }
}

/// Execute the frontier command.
pub async fn execute(
    args: &FrontierArgs,
    options: &DataOptions,
    format: OutputFormat,
) -> Result<()> {
    let analyzer = build_analyzer(options)?;
    let statistics = analyzer
        .statistics(&args.first, &args.second)
        .await
        .map_err(CliError::from)?;

    let points = analyzer
        .engine()
        .frontier(&statistics)
        .collect::<AnalyticsResult<Vec<_>>>()
        .map_err(CliError::from)?;

    if format == OutputFormat::Table {
        print_header(&format!("Efficient Frontier ({} / {})", args.first, args.second));
    }
    print_output(&rows(&points)?, format)?;

    if let Some(path) = &args.plot {
        let title = format!("{} / {} efficient frontier", args.first, args.second);
        let plot = frontier_plot(&title, &points, analyzer.engine(), &statistics);
        write_plot(&plot, path)?;
        if format == OutputFormat::Table {
            print_success(&format!("Chart written to {}", path.display()));
        }
    }

    Ok(())
}

fn rows(points: &[FrontierPoint]) -> Result<Vec<FrontierRow>> {
    points.iter().map(FrontierRow::try_from).collect()
}

/// Frontier as volatility (x) against return (y), both in percent.
///
/// The minimum-variance portfolio is marked when it exists.
fn frontier_plot(
    title: &str,
    points: &[FrontierPoint],
    engine: &PortfolioEngine,
    statistics: &AssetStatistics,
) -> Plot {
    let x: Vec<f64> = points.iter().map(|p| p.volatility * 100.0).collect();
    let y: Vec<f64> = points.iter().map(|p| p.expected_return * 100.0).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(x, y)
            .name("Frontier")
            .mode(Mode::LinesMarkers),
    );

    match min_variance_portfolio(
        &statistics.returns,
        &statistics.covariance,
        engine.config().degeneracy_tolerance,
    ) {
        Ok(mvp) => plot.add_trace(
            Scatter::new(vec![mvp.stats.stdev * 100.0], vec![mvp.stats.mean * 100.0])
                .name("Minimum variance")
                .mode(Mode::Markers),
        ),
        Err(e) => debug!("no minimum-variance marker: {}", e),
    }

    let layout = Layout::new()
        .title(Title::from(title))
        .x_axis(Axis::new().title(Title::from("Volatility (%)")))
        .y_axis(Axis::new().title(Title::from("Expected return (%)")));
    plot.set_layout(layout);
    plot
}

fn write_plot(plot: &Plot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating plot output directory {:?}", parent))?;
    }
    fs::write(path, plot.to_html())
        .with_context(|| format!("failed writing plot to {}", path.display()))?;
    Ok(())
}
