use clap::{Parser as ClapParser, Subcommand};
use sceneq::cli::{self, CliError, InspectOptions, InspectResult, RunOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sceneq")]
#[command(about = "sceneq - CSS-like selector queries over UI scene trees")]
#[command(version)]
struct Cli {
    /// Log parser and evaluator activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a selector query against a scene document
    Run {
        /// The selector query to execute
        query: String,

        /// Path to the scene document (reads from stdin if not provided)
        #[arg(short, long)]
        scene: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show how a selector query parses
    Inspect {
        /// The selector query to inspect
        query: String,

        /// Report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            query,
            scene,
            pretty,
        } => run_query(query, scene, pretty),
        Commands::Inspect { query, json } => {
            let options = InspectOptions { query, json };
            match cli::execute_inspect(&options) {
                InspectResult::Text(text) => print!("{}", text),
                InspectResult::Json(value) => {
                    println!("{}", serde_json::to_string_pretty(&value).unwrap());
                }
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "sceneq=trace" } else { "sceneq=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_query(query: String, scene: Option<String>, pretty: bool) -> Result<(), CliError> {
    let scene = match scene {
        Some(path) => Some(std::fs::read_to_string(path).map_err(CliError::Io)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        query,
        scene,
        pretty,
    };
    let report = cli::execute_run(&options)?;

    let json = if options.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .unwrap();
    println!("{}", json);
    Ok(())
}
