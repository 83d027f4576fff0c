// botsentry/src/main.rs
//
// botsentry — activity-log bot detection.
//
// Reads a newline-delimited JSON activity log, builds per-user timelines,
// slides a fixed-duration window over each, and flags users whose action
// volume or identical-action runs cross the configured thresholds.
//
// Usage:
//   botsentry --input activity.jsonl
//   botsentry --input activity.jsonl --output bots.json \
//             --duration-minutes 4 --max-occurrences 10 --min-repeated-actions 5

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod engine;
mod error;
mod events;
mod loader;
mod parser;
mod pipeline;
mod state;
mod workers;

use engine::classifier::DetectionConfig;
use events::BotFinding;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name    = "botsentry",
    about   = "Sliding-window bot detection over activity logs",
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    #[arg(long, help = "Newline-delimited JSON activity log")]
    input: PathBuf,

    #[arg(long, help = "Write the flagged usernames as a JSON array to this file")]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 4, help = "Sliding-window length in minutes")]
    duration_minutes: u32,

    #[arg(long, default_value_t = 10,
          help = "Actions tolerated inside one window before the volume trigger fires")]
    max_occurrences: u32,

    #[arg(long, default_value_t = 5,
          help = "Identical-action run length that fires the repetition trigger")]
    min_repeated_actions: u32,

    #[arg(long, help = "Pretty-print the output JSON")]
    pretty: bool,
}

// ── Terminal output ───────────────────────────────────────────────────────────

fn print_alert(finding: &BotFinding) {
    let ev = finding.evidence.join(" | ");
    println!(
        "\x1b[91;1m  BOT\x1b[0m {}  \x1b[90m{}\x1b[0m",
        finding.user, ev
    );
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("botsentry=info".parse()?),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let config = DetectionConfig {
        duration_minutes: cli.duration_minutes,
        max_occurrences: cli.max_occurrences,
        min_repeated_actions: cli.min_repeated_actions,
    };

    let report = pipeline::detect(&cli.input, &config).await?;
    report.print_summary();
    for finding in report.findings() {
        print_alert(finding);
    }

    let rendered = if cli.pretty {
        report.to_json_pretty()
    } else {
        report.to_json()
    };

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, rendered + "\n").await?;
            info!("wrote {} bot name(s) to {}", report.n_bots(), path.display());
        }
        None => println!("\n{}", rendered),
    }

    Ok(())
}
