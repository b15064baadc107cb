//! Fly game CLI
//!
//! Prints generated routes and runs a console game session driven by one
//! command per line on stdin.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fly_engine::{Config, FlyError, GameSession, Grid, RouteGenerator, SessionRng};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

/// Greeting returned by the `welcome` console command.
const WELCOME_MESSAGE: &str = "Welcome to the fly Game!";

/// Fly game - procedural fly routes with audio cues
#[derive(Parser, Debug)]
#[command(name = "fly")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: fly.json in current directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one route and print it as JSON
    Route {
        /// Number of moves to request (default: defaultSteps from config)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,

        /// Override the grid size from config
        #[arg(short, long)]
        grid_size: Option<u32>,
    },

    /// Run a console session reading commands from stdin
    Play {
        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(config = ?args.config, "Config file");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Route {
            steps,
            seed,
            grid_size,
        } => {
            let generator = match grid_size {
                Some(size) => RouteGenerator::new(Grid::new(size)?, config.audio_cues.clone()),
                None => config.route_generator()?,
            };
            let steps = steps.unwrap_or(config.default_steps);
            let mut rng = SessionRng::from_seed_or_random(seed.or(config.seed));
            tracing::info!(seed = rng.seed(), steps, "Generating route");

            let descriptor = generator.generate(steps, &mut rng);
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            Ok(())
        }
        Command::Play { seed } => {
            let rng = SessionRng::from_seed_or_random(seed.or(config.seed));
            tracing::info!(
                seed = rng.seed(),
                grid_size = config.grid_size,
                "Fly game session starting"
            );
            let session = GameSession::new(config.route_generator()?, rng);
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_console(&session, config.default_steps, stdin.lock(), stdout.lock())
        }
    }
}

/// Loads configuration from the specified path or default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

// ============================================================================
// Console session
// ============================================================================

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConsoleCommand {
    Welcome,
    Play(Option<usize>),
    Settings,
    Exit,
    Difficulty(String),
    Score(i64),
    State,
    Route,
    Quit,
}

/// Parses one console line. Blank lines yield `None`.
fn parse_command(line: &str) -> anyhow::Result<Option<ConsoleCommand>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match (name, arg) {
        ("welcome", None) => ConsoleCommand::Welcome,
        ("play", None) => ConsoleCommand::Play(None),
        ("play", Some(steps)) => ConsoleCommand::Play(Some(
            steps
                .parse()
                .map_err(|_| anyhow::anyhow!("steps must be a non-negative integer, got '{steps}'"))?,
        )),
        ("settings", None) => ConsoleCommand::Settings,
        ("exit", None) => ConsoleCommand::Exit,
        ("difficulty", Some(level)) => ConsoleCommand::Difficulty(level.to_string()),
        ("score", Some(value)) => ConsoleCommand::Score(
            value
                .parse()
                .map_err(|_| anyhow::anyhow!("score must be an integer, got '{value}'"))?,
        ),
        ("state", None) => ConsoleCommand::State,
        ("route", None) => ConsoleCommand::Route,
        ("quit", None) => ConsoleCommand::Quit,
        _ => anyhow::bail!("unknown command '{}'", line.trim()),
    };

    if words.next().is_some() {
        anyhow::bail!("too many arguments in '{}'", line.trim());
    }
    Ok(Some(command))
}

/// Applies a command to the session and returns the JSON response.
fn execute(
    session: &GameSession,
    default_steps: usize,
    command: ConsoleCommand,
) -> anyhow::Result<Value> {
    let value = match command {
        ConsoleCommand::Welcome => json!({ "message": WELCOME_MESSAGE }),
        ConsoleCommand::Play(steps) => {
            serde_json::to_value(session.start_game(steps.unwrap_or(default_steps)))?
        }
        ConsoleCommand::Settings => serde_json::to_value(session.open_settings())?,
        ConsoleCommand::Exit => serde_json::to_value(session.exit_game())?,
        ConsoleCommand::Difficulty(level) => match session.set_difficulty(&level) {
            Ok(ack) => serde_json::to_value(ack)?,
            Err(FlyError::InvalidDifficulty { value }) => {
                json!({ "error": format!("invalid difficulty level '{value}'") })
            }
            Err(e) => return Err(e.into()),
        },
        ConsoleCommand::Score(value) => serde_json::to_value(session.set_score(value))?,
        ConsoleCommand::State => serde_json::to_value(session.get_state())?,
        ConsoleCommand::Route => serde_json::to_value(session.get_state().current_route)?,
        ConsoleCommand::Quit => Value::Null,
    };
    Ok(value)
}

/// Reads commands from `input` until `quit` or end of input, writing one
/// JSON value per line to `output`.
fn run_console<R: BufRead, W: Write>(
    session: &GameSession,
    default_steps: usize,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let response = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(command)) => execute(session, default_steps, command)?,
            Err(e) => {
                tracing::warn!(line = %line.trim(), error = %e, "Rejected console command");
                json!({ "error": e.to_string() })
            }
        };
        writeln!(output, "{response}")?;
        output.flush()?;
    }

    let state = session.get_state();
    tracing::info!(status = %state.status, score = state.score, "Console session ended");
    Ok(())
}
