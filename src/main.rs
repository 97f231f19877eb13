use agentkit::cli::install::InstallArgs;
use agentkit::cli::KindFlags;
use agentkit::{Config, Mode, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agentkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Install AI agent skills, rules, commands and agents into your projects", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install artifacts that are not yet present in the targets
    Install(InstallArgs),

    /// Re-install artifacts, replacing what the targets already have
    Update(InstallArgs),

    /// List artifacts found in a source
    List {
        /// Local path, owner/repo[/branch] or GitHub URL (default: current directory)
        source: Option<String>,

        #[command(flatten)]
        kinds: KindFlags,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Show or change the default target and link method
    Config {
        /// Set the default target key
        #[arg(short, long)]
        target: Option<String>,

        /// Set the default link method (symlink or copy)
        #[arg(short, long)]
        method: Option<String>,

        /// Print the current configuration
        #[arg(short, long)]
        show: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: failed to start runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Install(args) => {
            let (config, _) = load_config()?;
            println!("{}", "🚀 Installing artifacts...".cyan());
            agentkit::cli::install::run(Mode::Install, args, &config).await?;
        }

        Commands::Update(args) => {
            let (config, _) = load_config()?;
            println!("{}", "🔄 Updating artifacts...".cyan());
            agentkit::cli::install::run(Mode::Update, args, &config).await?;
        }

        Commands::List {
            source,
            kinds,
            json,
        } => {
            agentkit::cli::list::run(source.as_deref(), kinds, json).await?;
        }

        Commands::Config {
            target,
            method,
            show,
        } => {
            let (config, path) = load_config()?;
            agentkit::cli::config::run(
                config,
                &path,
                target.as_deref(),
                method.as_deref(),
                show,
            )?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "agentkit", &mut io::stdout());
        }
    }

    Ok(())
}

/// Read the user config once; callers pass it down explicitly
fn load_config() -> Result<(Config, PathBuf)> {
    let path = Config::config_path()?;
    let config = Config::load_from(&path)?;
    Ok((config, path))
}
