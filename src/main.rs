use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use box_office_draft::run::{failure_kind, score_leagues, FailureKind};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Score every league and print the results (default if no subcommand)
    Score,
    /// Validate configs and inputs without printing results
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "box-office-draft")]
#[command(about = "Fantasy box-office draft scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and detailed tables
    #[arg(short, long, global = true)]
    verbose: bool,

    /// League config file; repeat for several leagues
    /// (defaults to ~/.config/box-office-draft/league.yaml)
    #[arg(short, long, global = true)]
    config: Vec<String>,

    /// Output format for scored leagues
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also write each league's results to <OUT_DIR>/<draft_id>.json
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn exit_code_for(kind: FailureKind) -> i32 {
    match kind {
        FailureKind::Config => EXIT_CONFIG,
        FailureKind::Data => EXIT_DATA,
        FailureKind::Io => EXIT_IO,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Score);
    let start_time = Instant::now();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_paths: Vec<PathBuf> = if cli.config.is_empty() {
        match box_office_draft::config::get_config_path() {
            Ok(path) => vec![path],
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    } else {
        cli.config.iter().map(PathBuf::from).collect()
    };

    let outcomes = score_leagues(&config_paths).await;

    let use_colors = box_office_draft::output::should_use_colors();
    let mut exit_code = EXIT_SUCCESS;
    let mut printed_any = false;

    for outcome in &outcomes {
        let report = match &outcome.result {
            Ok(report) => report,
            Err(e) => {
                eprintln!("{}: {:#}", outcome.config_path.display(), e);
                // First failure decides the exit code; remaining leagues still run
                if exit_code == EXIT_SUCCESS {
                    exit_code = exit_code_for(failure_kind(e));
                }
                continue;
            }
        };

        match command {
            Commands::Check => {
                println!(
                    "{}: ok ({} drafters, {} movies, {} input issue(s))",
                    report.draft_id,
                    report.scoreboard.len(),
                    report.entries.len(),
                    report.issues.len()
                );
            }
            Commands::Score => {
                let rendered = match cli.format {
                    OutputFormat::Table => Ok(box_office_draft::output::format_report(
                        report,
                        use_colors,
                        cli.verbose,
                    )),
                    OutputFormat::Tsv => Ok(box_office_draft::output::format_tsv(report)),
                    OutputFormat::Json => box_office_draft::output::report_to_json(report),
                };

                match rendered {
                    Ok(text) if text.is_empty() => {}
                    Ok(text) => {
                        if printed_any && matches!(cli.format, OutputFormat::Table) {
                            println!();
                        }
                        println!("{}", text);
                        printed_any = true;
                    }
                    Err(e) => {
                        error!(draft_id = %report.draft_id, "Failed to render report: {:#}", e);
                        if exit_code == EXIT_SUCCESS {
                            exit_code = EXIT_IO;
                        }
                    }
                }

                if let Some(dir) = &cli.out_dir {
                    match box_office_draft::output::write_report_json(dir, report) {
                        Ok(path) => info!(draft_id = %report.draft_id, path = %path.display(), "Wrote report"),
                        Err(e) => {
                            error!(draft_id = %report.draft_id, "{:#}", e);
                            if exit_code == EXIT_SUCCESS {
                                exit_code = EXIT_IO;
                            }
                        }
                    }
                }
            }
        }
    }

    info!(
        leagues = outcomes.len(),
        failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
        "Done in {:?}",
        start_time.elapsed()
    );

    std::process::exit(exit_code);
}
