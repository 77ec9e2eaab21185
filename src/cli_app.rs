//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::Colorize;
use colored::control;
use serde_json::json;

use witness_viz::chart::aggregate;
use witness_viz::core::config::Config;
use witness_viz::core::errors::Result;
use witness_viz::logger::{EventType, JsonlLogger};
use witness_viz::model::Dataset;
use witness_viz::tui::theme::Theme;
use witness_viz::tui::{ViewerConfig, run as run_viewer};

/// Width of the widest horizontal bar in `summary` output.
const SUMMARY_BAR_WIDTH: usize = 30;

/// Witness distribution viewer for test-execution results.
#[derive(Debug, Parser)]
#[command(
    name = "wviz",
    author,
    version,
    about = "Witness Viz - test result bar charts in your terminal",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode (summary only).
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Log every session event, even when the config disables logging.
    #[arg(long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log errors only.
    #[arg(long, global = true)]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Run the live dashboard.
    View(ViewArgs),
    /// Print a one-shot witness summary and exit.
    Summary(SummaryArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct ViewArgs {
    /// JSONL results file to watch.
    #[arg(long, value_name = "PATH")]
    results: PathBuf,
    /// Refresh rate override in frames per second.
    #[arg(long, value_name = "FPS")]
    fps: Option<f64>,
    /// Open with the help overlay visible.
    #[arg(long)]
    help_overlay: bool,
}

#[derive(Debug, Clone, Args)]
struct SummaryArgs {
    /// JSONL results file to read.
    #[arg(long, value_name = "PATH")]
    results: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// Dispatch the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        control::set_override(false);
    }
    match &cli.command {
        Command::View(args) => run_view(cli, args),
        Command::Summary(args) => run_summary(cli, args),
        Command::Completions(args) => {
            generate(
                args.shell,
                &mut Cli::command(),
                "wviz",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

fn run_view(cli: &Cli, args: &ViewArgs) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(fps) = args.fps {
        config.view.fps = fps;
    }
    if args.help_overlay {
        config.view.start_with_help = true;
    }
    config.validate()?;

    let theme = if cli.no_color {
        Theme::from_no_color_flag(true)
    } else {
        Theme::from_environment()
    };
    let mut logger = JsonlLogger::from_config(&config.log);
    if cli.verbose {
        logger = logger.verbose();
    }
    if cli.quiet {
        logger = logger.quiet();
    }
    logger.log_simple(EventType::SessionStart);

    let viewer = ViewerConfig {
        results: args.results.clone(),
        config,
        theme,
    };
    run_viewer(&viewer, &logger)
}

fn run_summary(cli: &Cli, args: &SummaryArgs) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let dataset = Dataset::load(&args.results)?;
    let agg = aggregate(&dataset, config.chart.max_bars);

    if cli.json {
        print_summary_json(&dataset, &agg);
        return Ok(());
    }

    if dataset.skipped_lines() > 0 {
        eprintln!(
            "{}",
            format!("warning: skipped {} malformed lines", dataset.skipped_lines()).yellow()
        );
    }
    for tally in &agg.tallies {
        let (passed, failed) = dataset.outcome_totals(&tally.test_name);
        println!(
            "{}  {} passed, {} failed",
            tally.test_name.bold(),
            passed.to_string().green(),
            failed.to_string().red(),
        );
        let max = usize::try_from(tally.max_count()).unwrap_or(usize::MAX).max(1);
        let name_width = tally
            .witnesses
            .iter()
            .map(|(w, _)| w.chars().count())
            .max()
            .unwrap_or(0);
        for (witness, count) in &tally.witnesses {
            let bar_len =
                usize::try_from(*count).unwrap_or(usize::MAX) * SUMMARY_BAR_WIDTH / max;
            println!(
                "    {witness:<name_width$} {count:>5} {}",
                "\u{2588}".repeat(bar_len.max(1)).cyan()
            );
        }
        if tally.witnesses.is_empty() {
            println!("    {}", "(no failing witnesses)".dimmed());
        }
        println!();
    }
    Ok(())
}

fn print_summary_json(dataset: &Dataset, agg: &witness_viz::chart::Aggregate) {
    let tests: Vec<_> = agg
        .tallies
        .iter()
        .map(|tally| {
            let (passed, failed) = dataset.outcome_totals(&tally.test_name);
            json!({
                "name": tally.test_name,
                "passed": passed,
                "failed": failed,
                "witnesses": tally
                    .witnesses
                    .iter()
                    .map(|(witness, count)| json!({"witness": witness, "count": count}))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    let payload = json!({
        "tests": tests,
        "global_max": agg.global_max,
        "skipped_lines": dataset.skipped_lines(),
    });
    println!("{payload:#}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_takes_results_as_a_named_option() {
        let cli = Cli::try_parse_from([
            "wviz",
            "view",
            "--results",
            "r.jsonl",
            "--fps",
            "2.5",
        ])
        .unwrap();
        let Command::View(args) = &cli.command else {
            panic!("expected view command");
        };
        assert_eq!(args.results, PathBuf::from("r.jsonl"));
        assert_eq!(args.fps, Some(2.5));
    }

    #[test]
    fn view_without_results_is_rejected() {
        assert!(Cli::try_parse_from(["wviz", "view"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_are_global_flags() {
        let cli =
            Cli::try_parse_from(["wviz", "summary", "--results", "r.jsonl", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);

        let cli =
            Cli::try_parse_from(["wviz", "--quiet", "view", "--results", "r.jsonl"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        let err = Cli::try_parse_from([
            "wviz",
            "view",
            "--results",
            "r.jsonl",
            "--verbose",
            "--quiet",
        ]);
        assert!(err.is_err());
    }
}
