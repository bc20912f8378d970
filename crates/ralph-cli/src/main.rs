mod cmd;
mod output;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::picker::{self, Choice};
use cmd::Ctx;
use ui::Theme;

#[derive(Parser)]
#[command(
    name = "ralph",
    about = "Run an AI coding agent in a loop until every story in the PRD passes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON (status, list)
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Agent executable to launch
    #[arg(long, global = true, env = "RALPH_AGENT_BIN", default_value = "claude")]
    agent_bin: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure RALPH_HOME and install skills
    Setup {
        /// RALPH_HOME directory (prompted for when omitted)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Directory of skills to link into the Claude skills directory
        #[arg(long)]
        skills: Option<PathBuf>,
    },

    /// Print RALPH_HOME
    Home,

    /// Print this project's data directory
    ProjectDir,

    /// Initialize ralph for the current directory
    Init,

    /// Run the agent loop
    Run {
        /// Maximum number of iterations
        #[arg(default_value_t = 25)]
        iterations: usize,

        /// Pause between iterations, in seconds
        #[arg(long, default_value_t = 2, hide = true)]
        sleep_secs: u64,
    },

    /// Show PRD progress for the current project
    Status,

    /// Open Claude to write a PRD
    Prd,

    /// List all projects
    List,

    /// Show a saved run log
    Logs {
        /// Log number from the list (prompted for when omitted)
        index: Option<usize>,
    },

    /// Archive the current PRD and progress
    Archive,

    /// Remove run files for the current project
    Clean {
        /// Remove the whole project data directory
        #[arg(long, short = 'a')]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Ctx {
        theme: Theme::detect(),
        json: cli.json,
        agent_bin: cli.agent_bin,
    };

    let command = match cli.command {
        Some(command) => command,
        None => match pick(&ctx) {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(e) => {
                eprintln!("error: {e:#}");
                std::process::exit(1);
            }
        },
    };

    let result = match command {
        Commands::Setup { path, skills } => cmd::setup::run(&ctx, path, skills),
        Commands::Home => cmd::init::home(),
        Commands::ProjectDir => cmd::init::project_dir(),
        Commands::Init => cmd::init::run(&ctx),
        Commands::Run {
            iterations,
            sleep_secs,
        } => cmd::run::run(&ctx, iterations, Duration::from_secs(sleep_secs)),
        Commands::Status => cmd::status::run(&ctx),
        Commands::Prd => cmd::prd::run(&ctx),
        Commands::List => cmd::list::run(&ctx),
        Commands::Logs { index } => cmd::logs::run(&ctx, index),
        Commands::Archive => cmd::archive::run(&ctx),
        Commands::Clean { all, yes } => cmd::clean::run(&ctx, all, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Interactive menu for a bare `ralph`. `None` means nothing to run.
fn pick(ctx: &Ctx) -> anyhow::Result<Option<Commands>> {
    let stdin = std::io::stdin();
    let choice = picker::choose(&mut stdin.lock(), &mut std::io::stdout(), &ctx.theme)?;
    let command = match choice {
        None => return Ok(None),
        Some(Choice::Help) => {
            Cli::command().print_help()?;
            return Ok(None);
        }
        Some(Choice::Run) => Commands::Run {
            iterations: 25,
            sleep_secs: 2,
        },
        Some(Choice::Init) => Commands::Init,
        Some(Choice::Status) => Commands::Status,
        Some(Choice::Prd) => Commands::Prd,
        Some(Choice::List) => Commands::List,
        Some(Choice::Logs) => Commands::Logs { index: None },
        Some(Choice::Archive) => Commands::Archive,
        Some(Choice::Clean) => Commands::Clean {
            all: false,
            yes: false,
        },
        Some(Choice::Setup) => Commands::Setup {
            path: None,
            skills: None,
        },
    };
    println!();
    Ok(Some(command))
}
