use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use archgraph::config::AnalyzerConfig;
use archgraph::core::CodebaseAnalyzer;
use archgraph::formatters::JsonReportFormatter;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "archgraph",
    version,
    about = "Multi-language structural scan and file dependency graph"
)]
struct Cli {
    /// Input directory to analyze
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file path for the JSON report
    #[arg(short, long, value_name = "FILE", default_value = "architecture.json")]
    output: PathBuf,

    /// TOML file overriding the ignore set and extension table
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Omit per-file records from the report
    #[arg(long)]
    summary_only: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        config,
        summary_only,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let config = match config {
        Some(path) => AnalyzerConfig::load(&path)?,
        None => AnalyzerConfig::default(),
    };

    println!("ARCHGRAPH - Codebase Structure Analysis");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    let mut analyzer = CodebaseAnalyzer::with_config(config);
    let analysis = analyzer.analyze(&input)?;

    if analysis.metadata.total_files == 0 {
        bail!("no supported files found under {}", input.display());
    }

    println!(
        "Found {} files in {} languages",
        analysis.metadata.total_files,
        analysis.metadata.language_stats.len()
    );
    for (language, stats) in &analysis.metadata.language_stats {
        println!(
            "   - {}: {} files, {} lines",
            language, stats.files, stats.lines
        );
    }

    let stats = &analysis.statistics;
    println!("Graph nodes: {}", stats.total_nodes);
    println!("Dependencies: {}", stats.total_edges);
    println!(
        "Density: {} ({:?}), strongly connected components: {}",
        stats.density, stats.complexity, stats.strongly_connected_components
    );

    JsonReportFormatter::new()
        .with_files(!summary_only)
        .format_to_file(&analysis, &output)?;

    println!("Analysis complete. Generated {}", output.display());
    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
