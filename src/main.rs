use analytics::{
    AnalyticsEngine, ColorTable, EventOverlay, MetricsResult, align_events, compute_forward_summary,
    cumulative_points, encode_rank_heatmap, filter_by_date_range, format_pct,
};
use anyhow::Context;
use artifacts::{load_event_study, load_rank_matrix, load_return_series};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::settings::Config;
use configuration::{AnalysisArgs, AnalysisSettings, init_logging, load_config_from};
use core_types::{DateRange, EventKind, ForwardReturnSummary, Horizon, ReturnSeries};
use serde::Serialize;
use std::path::PathBuf;

/// The main entry point for the factorlens CLI.
fn main() -> anyhow::Result<()> {
    // Load environment overrides (RUST_LOG, FACTORLENS__*) from a .env file if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = init_logging(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Metrics(args) => handle_metrics(args, &config),
        Commands::Curve(args) => handle_curve(args, &config),
        Commands::Events(args) => handle_events(args),
        Commands::Heatmap(args) => handle_heatmap(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Factor analytics over pre-built return, event and ranking artifacts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annualized return, volatility, Sharpe and max drawdown per series.
    Metrics(MetricsArgs),
    /// Cumulative growth-of-1 curve of a series.
    Curve(CurveArgs),
    /// Align peak/trough events to a benchmark and report forward returns.
    Events(EventsArgs),
    /// Encode the monthly ranking as a categorical heatmap.
    Heatmap(HeatmapArgs),
}

#[derive(Parser)]
struct MetricsArgs {
    /// Return series artifacts (JSON), one row per file.
    #[arg(long = "series", required = true, num_args = 1..)]
    series: Vec<PathBuf>,

    #[command(flatten)]
    analysis: AnalysisArgs,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CurveArgs {
    /// Return series artifact (JSON).
    #[arg(long)]
    series: PathBuf,

    #[command(flatten)]
    analysis: AnalysisArgs,
}

#[derive(Parser)]
struct EventsArgs {
    /// Benchmark return series artifact (JSON).
    #[arg(long)]
    benchmark: PathBuf,

    /// Global-wave event artifact (JSON).
    #[arg(long)]
    events: PathBuf,

    /// Recompute the forward-return summary from the benchmark returns.
    #[arg(long)]
    compute: bool,
}

#[derive(Parser)]
struct HeatmapArgs {
    /// Monthly ranking artifact (JSON).
    #[arg(long)]
    ranking: PathBuf,

    /// Emit rows bottom-up (last rank first) for renderers that cannot flip axes.
    #[arg(long)]
    bottom_up: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_metrics(args: MetricsArgs, config: &Config) -> anyhow::Result<()> {
    let settings = resolve_settings(&config.analysis, &args.analysis)?;
    let series = load_all_series(&args.series)?;

    let engine = AnalyticsEngine::new(settings.periods_per_year);
    let range = date_range(&settings);
    let rows = engine.calculate_all(&series, range.as_ref(), settings.risk_free_rate);
    tracing::info!(rows = rows.len(), "Calculated metrics.");

    if args.json {
        print_json(&rows)
    } else {
        println!("{}", metrics_table(&rows));
        Ok(())
    }
}

fn handle_curve(args: CurveArgs, config: &Config) -> anyhow::Result<()> {
    let settings = resolve_settings(&config.analysis, &args.analysis)?;
    let series = load_return_series(&args.series)
        .with_context(|| format!("Failed to load series {}", args.series.display()))?;
    let series = apply_range(series, &settings);

    #[derive(Serialize)]
    struct CurveOutput {
        label: String,
        points: Vec<analytics::CurvePoint>,
    }

    print_json(&CurveOutput {
        points: cumulative_points(&series),
        label: series.label,
    })
}

fn handle_events(args: EventsArgs) -> anyhow::Result<()> {
    let benchmark = load_return_series(&args.benchmark)
        .with_context(|| format!("Failed to load benchmark {}", args.benchmark.display()))?;
    let study = load_event_study(&args.events)
        .with_context(|| format!("Failed to load events {}", args.events.display()))?;

    let overlay = align_events(&benchmark, &study.events);
    let (summary, source) = if args.compute {
        (compute_forward_summary(&benchmark, &study.events), "computed")
    } else {
        (study.summary, "artifact")
    };
    log_summary(&summary);

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct EventsOutput {
        label: String,
        benchmark: String,
        overlay: EventOverlay,
        summary: ForwardReturnSummary,
        summary_source: &'static str,
    }

    print_json(&EventsOutput {
        label: study.label,
        benchmark: benchmark.label,
        overlay,
        summary,
        summary_source: source,
    })
}

fn handle_heatmap(args: HeatmapArgs, config: &Config) -> anyhow::Result<()> {
    let matrix = load_rank_matrix(&args.ranking)
        .with_context(|| format!("Failed to load ranking {}", args.ranking.display()))?;
    let colors = ColorTable::new(config.palette.color_map(), config.palette.default_color.clone());

    let heatmap = encode_rank_heatmap(&matrix, &colors);
    tracing::info!(
        months = heatmap.months.len(),
        ranks = heatmap.rank_labels.len(),
        "Encoded rank heatmap."
    );

    if args.bottom_up {
        print_json(&heatmap.bottom_up())
    } else {
        print_json(&heatmap)
    }
}

// ==============================================================================
// Helpers
// ==============================================================================

fn resolve_settings(
    base: &AnalysisSettings,
    overrides: &AnalysisArgs,
) -> anyhow::Result<AnalysisSettings> {
    overrides
        .resolve(base)
        .context("Invalid analysis settings after command-line overrides")
}

/// The configured range, or `None` unless both bounds are given.
fn date_range(settings: &AnalysisSettings) -> Option<DateRange> {
    match (&settings.start_date, &settings.end_date) {
        (Some(start), Some(end)) => Some(DateRange::new(start.clone(), end.clone())),
        (None, None) => None,
        _ => {
            tracing::warn!("Only one date range bound given, ignoring the range.");
            None
        }
    }
}

fn apply_range(series: ReturnSeries, settings: &AnalysisSettings) -> ReturnSeries {
    match date_range(settings) {
        Some(range) => filter_by_date_range(&series, &range),
        None => series,
    }
}

fn load_all_series(paths: &[PathBuf]) -> anyhow::Result<Vec<ReturnSeries>> {
    paths
        .iter()
        .map(|path| {
            load_return_series(path)
                .with_context(|| format!("Failed to load series {}", path.display()))
        })
        .collect()
}

fn metrics_table(rows: &[MetricsResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Factor", "Ann. Return", "Ann. Volatility", "Sharpe", "Max Drawdown"]);
    for row in rows {
        table.add_row(vec![
            row.label.clone(),
            format_pct(Some(row.annualized_return)),
            format_pct(Some(row.annualized_volatility)),
            row.sharpe_ratio
                .map_or_else(|| "N/A".to_string(), |s| format!("{s:.2}")),
            format_pct(Some(row.max_drawdown)),
        ]);
    }
    table
}

fn log_summary(summary: &ForwardReturnSummary) {
    for kind in [EventKind::Trough, EventKind::Peak] {
        for horizon in Horizon::ALL {
            let stats = summary.get(kind, horizon);
            tracing::info!(
                %kind,
                %horizon,
                events = stats.event_count,
                average = %format_pct(stats.average_forward_return),
                "Forward return."
            );
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
