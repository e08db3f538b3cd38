mod echo;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sitepulse_core::{AnalysisReport, Analyzer, AnalyzerConfig, FetchResult, LinkCheckReport, Tier};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Analyze the health of a web page
#[derive(Parser, Debug)]
#[command(name = "sitepulse")]
#[command(author = "SitePulse Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Analyze the health of a web page", long_about = None)]
struct Args {
    /// URL to analyze, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Analysis tier (basic, advanced)
    #[arg(short, long, default_value = "basic", value_name = "TIER")]
    tier: Tier,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "15", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// How many same-host links to verify
    #[arg(long, default_value = "5", value_name = "NUM")]
    link_sample: usize,

    /// Skip broken link verification
    #[arg(long)]
    no_links: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Render the report as a plain text summary.
fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("SitePulse report for {}\n", report.url));
    out.push_str(&format!("Tier: {:?}    Score: {}/100\n\n", report.tier, report.score));
    out.push_str(&format!(
        "Fetch: HTTP {} in {}ms{}\n",
        report.fetch.status,
        report.fetch.elapsed_ms,
        if report.fetch.https_used { " (https)" } else { "" }
    ));
    out.push_str(&format!(
        "Links: {} checked, {} broken\n",
        report.links.checked, report.links.broken
    ));

    out.push_str("\nIssues:\n");
    if report.issues.free.is_empty() {
        out.push_str("  (none)\n");
    }
    for issue in &report.issues.free {
        out.push_str(&format!("  - {}\n", issue));
    }

    out.push_str("\nFurther improvements:\n");
    if report.issues.pro.is_empty() {
        out.push_str("  (none)\n");
    }
    for issue in &report.issues.pro {
        out.push_str(&format!("  - {}\n", issue));
    }

    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "sitepulse=debug,sitepulse_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(io::stderr)
        .init();

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let mut builder = AnalyzerConfig::builder()
        .fetch_timeout(args.timeout)
        .link_sample(if args.no_links { 0 } else { args.link_sample });
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    let analyzer = Analyzer::with_config(builder.build());

    let started = Instant::now();
    let mut timings: Vec<(String, std::time::Duration)> = Vec::new();

    let report = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 2, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        analyze_local(&analyzer, buffer, args.tier, args.verbose)
    } else if args.input.starts_with("http://") || args.input.starts_with("https://") || looks_like_host(&args.input) {
        if args.verbose {
            echo::print_step(1, 2, &format!("Analyzing {}", args.input.bright_white().underline()));
        }
        let result = analyzer.analyze(&args.input, args.tier).await;
        timings.push(("Fetch and analyze".to_string(), started.elapsed()));
        match result {
            Ok(report) => report,
            Err(e) => {
                echo::print_error(&format!("Analysis failed: {}", e));
                return Err(e.into());
            }
        }
    } else {
        if args.verbose {
            echo::print_step(1, 2, &format!("Reading from file {}", args.input.bright_white()));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        analyze_local(&analyzer, content, args.tier, args.verbose)
    };

    if args.verbose {
        eprintln!("  {} {}", "Score:".dimmed(), report.score.to_string().bright_white());
        eprintln!(
            "  {} {}",
            "Body:".dimmed(),
            echo::format_size(report.fetch.body_bytes).bright_white()
        );
        eprintln!();
        echo::print_step(2, 2, "Writing output");
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => {
            let mut json = report.to_json_string().context("Failed to serialize report")?;
            json.push('\n');
            json
        }
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Report written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.verbose {
        timings.push(("Render".to_string(), started.elapsed()));
        echo::print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}

/// Scores already-saved HTML without touching the network.
///
/// Transport facts are neutral stand-ins, so HTTPS and latency checks pass
/// and the report reflects the markup alone.
fn analyze_local(analyzer: &Analyzer, html: String, tier: Tier, verbose: bool) -> AnalysisReport {
    if verbose {
        echo::print_info("Local input: link verification and transport checks skipped");
    }

    let fetch = FetchResult {
        status: 200,
        elapsed_ms: 0,
        body: html,
        headers: HashMap::new(),
        final_url: "https://localhost/".to_string(),
    };

    analyzer.analyze_document(&fetch, tier, LinkCheckReport::default())
}

/// Treats scheme-less inputs with a dot and no path separator oddities as URLs.
fn looks_like_host(input: &str) -> bool {
    !input.contains('/') && input.contains('.') && !fs::metadata(input).map(|m| m.is_file()).unwrap_or(false)
}
