mod cmd;
mod output;
mod root;
mod tools;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use memory_bank_core::types::{ComplexityLevel, CreativeType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "memory-bank",
    about = "Structured development workflow: VAN, PLAN, CREATIVE, IMPLEMENT, REFLECT+ARCHIVE",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .memory_bank/ or .git/)
    #[arg(long, global = true, env = "MEMORY_BANK_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the memory bank and record the task's complexity level
    Van {
        /// Complexity level, 1 (quick fix) to 4 (complex system)
        complexity: ComplexityLevel,
        /// Task description
        description: Vec<String>,
    },

    /// Write the implementation plan
    Plan {
        /// Override the complexity level recorded by VAN
        #[arg(long)]
        complexity: Option<ComplexityLevel>,
    },

    /// Start a design document for one component
    Creative {
        /// Component name (becomes creative-<name>.md)
        component: String,
        /// Design focus: architecture, algorithm, or uiux
        #[arg(long = "type", value_name = "TYPE")]
        creative_type: CreativeType,
        /// Requirements and constraints
        #[arg(required = true)]
        requirements: Vec<String>,
    },

    /// Write the build guide for the current phase
    Implement {
        /// Implementation phase (levels 3 and 4)
        #[arg(long)]
        phase: Option<String>,
        /// Override the complexity level recorded by VAN
        #[arg(long)]
        complexity: Option<ComplexityLevel>,
    },

    /// Write the reflection document
    Reflect,

    /// Archive plan, progress and reflection, and reset the active context
    Archive,

    /// REFLECT+ARCHIVE with an explicit action ("reflect" or "archive")
    Finish { action: String },

    /// Show or validate .memory_bank/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run as an MCP stdio server
    Mcp,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    // stdout belongs to command output and the MCP channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Van {
            complexity,
            description,
        } => cmd::van::run(&root, complexity, &description, cli.json),
        Commands::Plan { complexity } => cmd::plan::run(&root, complexity, cli.json),
        Commands::Creative {
            component,
            creative_type,
            requirements,
        } => cmd::creative::run(&root, &component, creative_type, &requirements, cli.json),
        Commands::Implement { phase, complexity } => {
            cmd::implement::run(&root, phase, complexity, cli.json)
        }
        Commands::Reflect => cmd::finish::run(&root, "reflect", cli.json),
        Commands::Archive => cmd::finish::run(&root, "archive", cli.json),
        Commands::Finish { action } => cmd::finish::run(&root, &action, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Mcp => cmd::mcp::run(&root),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
