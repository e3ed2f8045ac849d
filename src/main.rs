use clap::{Parser, Subcommand};
use navstack::core::config::{self, CliOverrides, ResolvedConfig};
use navstack::core::scenario::{self, ErrorPolicy, OutputFormat};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "navstack", about = "Immutable navigation state, interactively or scripted")]
struct Args {
    /// Config file (defaults to ~/.navstack/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Explore a navigation stack in the terminal (default)
    Play,
    /// Replay a JSON scenario and print what each action did
    Replay {
        /// Scenario file
        file: PathBuf,
        /// What to do when an action is rejected
        #[arg(long, value_enum)]
        on_error: Option<ErrorPolicy>,
        /// Report format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, source) = match config::load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("navstack: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize file logger - the playground owns the terminal, so nothing goes to stderr
    let (log_level, log_path) = config::log_settings(&file_config);
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&log_path) {
        let _ = WriteLogger::init(log_level, log_config, log_file);
    }

    source.log();
    log::debug!("Config: {:?}", file_config);

    let cli = match &args.command {
        Some(Command::Replay {
            on_error, output, ..
        }) => CliOverrides {
            on_error: *on_error,
            output: *output,
        },
        _ => CliOverrides::default(),
    };
    let resolved = config::resolve(&file_config, cli);

    match args.command.unwrap_or(Command::Play) {
        Command::Play => {
            log::info!(
                "navstack playground starting with {} routes",
                resolved.initial_state.len()
            );
            if let Err(e) = navstack::tui::run(resolved) {
                eprintln!("navstack: terminal error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Command::Replay { file, .. } => run_replay(&file, &resolved),
    }
}

/// Prints the report; fails when the scenario can't be loaded or the run halted.
fn run_replay(file: &Path, resolved: &ResolvedConfig) -> ExitCode {
    let report = match scenario::replay_file(file, resolved.on_error) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("Failed to load scenario {}: {}", file.display(), e);
            eprintln!("navstack: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.render(resolved.output));
    log::info!(
        "Replay finished: {} applied, {} rejected",
        report.applied(),
        report.rejected()
    );
    if report.completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
