//! Analyze command implementation.
//!
//! Minimum-variance portfolio, market portfolio and the two capital
//! allocation scenarios for a pair of tickers.

use std::io;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use meanvar_core::PortfolioReport;

use crate::cli::{DataOptions, OutputFormat};
use crate::commands::{build_analyzer, parse_rate, value_or_prompt};
use crate::error::CliError;
use crate::output::{
    format_percent, percent_value, print_header, print_output, ratio_value, KeyValue,
};

/// Arguments for the analyze command.
///
/// Missing positionals are asked for on stdin.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// First ticker (e.g. AAPL)
    pub first: Option<String>,

    /// Second ticker (e.g. MSFT)
    pub second: Option<String>,

    /// Annual risk-free rate as a decimal (e.g. 0.02)
    #[arg(allow_hyphen_values = true)]
    pub rate: Option<String>,
}

/// Execute the analyze command.
pub async fn execute(
    args: &AnalyzeArgs,
    options: &DataOptions,
    format: OutputFormat,
) -> Result<()> {
    let (first, second, rate) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt = io::stderr();

        let first = value_or_prompt(args.first.clone(), "First stock", &mut input, &mut prompt)?;
        let second =
            value_or_prompt(args.second.clone(), "Second stock", &mut input, &mut prompt)?;
        let rate =
            value_or_prompt(args.rate.clone(), "Risk-free rate", &mut input, &mut prompt)?;
        (first, second, parse_rate(&rate)?)
    };

    let analyzer = build_analyzer(options)?;
    let report = analyzer
        .analyze(&first, &second, rate)
        .await
        .map_err(CliError::from)?;

    match format {
        OutputFormat::Table => print_report_table(&first, &second, &report)?,
        OutputFormat::Json => {
            let summary = AnalysisSummary::new(&first, &second, &report)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Csv => print_output(&report_rows(&first, &second, &report), format)?,
    }

    Ok(())
}

fn print_report_table(first: &str, second: &str, report: &PortfolioReport) -> Result<()> {
    let rows = report_rows(first, second, report);
    let (mvp, rest) = rows.split_at(4);
    let (market, scenarios) = rest.split_at(5);

    print_header(&format!("Minimum Variance Portfolio ({} / {})", first, second));
    print_output(mvp, OutputFormat::Table)?;

    print_header("Market Portfolio");
    print_output(market, OutputFormat::Table)?;

    print_header(&format!(
        "Capital Allocation (risk-free {})",
        format_percent(report.risk_free_rate)
    ));
    print_output(scenarios, OutputFormat::Table)?;

    Ok(())
}

/// Flat metric rows: 4 minimum-variance, 5 market, 4 scenario.
fn report_rows(first: &str, second: &str, report: &PortfolioReport) -> Vec<KeyValue> {
    let mvp = &report.min_variance;
    let market = &report.market;

    vec![
        KeyValue::from_percent(format!("MVP weight {}", first), mvp.weights.a),
        KeyValue::from_percent(format!("MVP weight {}", second), mvp.weights.b),
        KeyValue::from_percent("MVP mean", mvp.stats.mean),
        KeyValue::from_percent("MVP stdev", mvp.stats.stdev),
        KeyValue::from_percent(format!("Market weight {}", first), market.weights.a),
        KeyValue::from_percent(format!("Market weight {}", second), market.weights.b),
        KeyValue::from_percent("Market mean", market.stats.mean),
        KeyValue::from_percent("Market stdev", market.stats.stdev),
        KeyValue::from_ratio("Market Sharpe", market.sharpe),
        KeyValue::from_percent("50% market mean", report.half_market.mean),
        KeyValue::from_percent("50% market stdev", report.half_market.stdev),
        KeyValue::from_percent("150% market mean", report.leveraged_market.mean),
        KeyValue::from_percent("150% market stdev", report.leveraged_market.stdev),
    ]
}

/// JSON form of an analysis, in percent with 2 decimals.
#[derive(Debug, Serialize)]
struct AnalysisSummary {
    first: String,
    second: String,
    risk_free_rate: Decimal,
    observations: usize,
    min_variance: WeightedSummary,
    market: WeightedSummary,
    half_market: ScenarioSummary,
    leveraged_market: ScenarioSummary,
}

#[derive(Debug, Serialize)]
struct WeightedSummary {
    first_weight: Decimal,
    second_weight: Decimal,
    mean: Decimal,
    stdev: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    sharpe: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct ScenarioSummary {
    mean: Decimal,
    stdev: Decimal,
}

fn pct(value: f64) -> Result<Decimal> {
    percent_value(value).ok_or_else(|| anyhow::anyhow!("value {} is not representable", value))
}

impl AnalysisSummary {
    fn new(first: &str, second: &str, report: &PortfolioReport) -> Result<Self> {
        let mvp = &report.min_variance;
        let market = &report.market;
        let sharpe = ratio_value(market.sharpe)
            .ok_or_else(|| anyhow::anyhow!("Sharpe ratio {} is not representable", market.sharpe))?;

        Ok(Self {
            first: first.to_string(),
            second: second.to_string(),
            risk_free_rate: pct(report.risk_free_rate)?,
            observations: report.statistics.observations,
            min_variance: WeightedSummary {
                first_weight: pct(mvp.weights.a)?,
                second_weight: pct(mvp.weights.b)?,
                mean: pct(mvp.stats.mean)?,
                stdev: pct(mvp.stats.stdev)?,
                sharpe: None,
            },
            market: WeightedSummary {
                first_weight: pct(market.weights.a)?,
                second_weight: pct(market.weights.b)?,
                mean: pct(market.stats.mean)?,
                stdev: pct(market.stats.stdev)?,
                sharpe: Some(sharpe),
            },
            half_market: ScenarioSummary {
                mean: pct(report.half_market.mean)?,
                stdev: pct(report.half_market.stdev)?,
            },
            leveraged_market: ScenarioSummary {
                mean: pct(report.leveraged_market.mean)?,
                stdev: pct(report.leveraged_market.stdev)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meanvar_core::{AssetStatistics, CovarianceMatrix, PortfolioEngine, ReturnVector};

    fn report() -> PortfolioReport {
        let statistics = AssetStatistics::new(
            ReturnVector::new(0.10, 0.20),
            CovarianceMatrix::new(0.04, 0.09, 0.0).unwrap(),
            250,
        );
        PortfolioEngine::default().analyze(&statistics, 0.02).unwrap()
    }

    #[test]
    fn test_report_rows() {
        let rows = report_rows("AAA", "BBB", &report());
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0].key, "MVP weight AAA");
        assert_eq!(rows[0].value, "69.23%");
        assert_eq!(rows[1].value, "30.77%");
        assert_eq!(rows[2].value, "13.08%");
        assert_eq!(rows[3].value, "16.64%");
        assert_eq!(rows[8].key, "Market Sharpe");
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = AnalysisSummary::new("AAA", "BBB", &report()).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["first"], "AAA");
        assert_eq!(json["observations"], 250);
        assert!(json["min_variance"].get("sharpe").is_none());
        assert!(json["market"]["sharpe"].is_number());
        assert!(json["half_market"]["mean"].is_number());
    }
}
