//! Defines the command-line interface structure using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "autoprompt", version, about = "Template-driven prompt builder with chaining and history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Manage reusable prompt templates
    #[command(subcommand)]
    Template(TemplateCmd),
    /// Render a prompt locally without calling a model
    Render {
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// Render a prompt, execute it with a model, and log the exchange
    Generate {
        #[command(flatten)]
        prompt: PromptArgs,
        #[command(flatten)]
        gen: GenArgs,
        /// Email identifying whose history the exchange is logged to
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
        /// Configured provider name, or a direct 'provider:model' spec
        #[arg(long)]
        provider: Option<String>,
    },
    /// Build and run multi-step prompt chains
    #[command(subcommand)]
    Chain(ChainCmd),
    /// Browse, rate, and export past exchanges
    #[command(subcommand)]
    History(HistoryCmd),
    /// Share exchanges with teammates on the same email domain
    #[command(subcommand)]
    Team(TeamCmd),
}

/// Inputs for rendering a single prompt from a stored template.
#[derive(Args)]
pub struct PromptArgs {
    /// Name of the stored template to fill
    #[arg(long, default_value = "general")]
    pub template: String,
    /// Who the model should act as (e.g. HR, Lawyer)
    #[arg(long)]
    pub role: String,
    /// Who the output addresses (e.g. Candidate, Client)
    #[arg(long)]
    pub audience: String,
    /// Writing tone
    #[arg(long, default_value = "Formal")]
    pub tone: String,
    /// Task description
    #[arg(long)]
    pub intent: String,
    /// Few-shot example in 'input::output' form; may be repeated
    #[arg(long = "example")]
    pub examples: Vec<String>,
}

/// Sampling parameters for model calls.
#[derive(Args)]
pub struct GenArgs {
    /// Sampling temperature, 0.0 to 1.0
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,
    /// Upper bound on generated tokens
    #[arg(long, default_value_t = 300)]
    pub max_tokens: u32,
}

#[derive(Subcommand)]
pub enum TemplateCmd {
    /// List all stored templates
    List,
    /// Create a new template interactively
    New,
    /// Print a template's structure
    Show { name: String },
    /// Edit a template's structure in $EDITOR
    Edit { name: String },
    /// Delete a template by name
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum ChainCmd {
    /// Create a chain definition interactively
    New,
    /// List stored chain definitions
    List,
    /// Run a chain: a stored definition, a YAML file, or ad-hoc --step flags
    Run {
        /// ID of a stored chain definition
        id: Option<String>,
        /// Path to a YAML chain definition (alternative to a stored ID)
        #[arg(long)]
        file: Option<String>,
        /// Ad-hoc step template; may be repeated, runs in order given
        #[arg(long = "step")]
        steps: Vec<String>,
        /// Seed input fed to the first step
        #[arg(long)]
        input: String,
        #[command(flatten)]
        gen: GenArgs,
        /// Email identifying whose history the run is logged to
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
        /// Configured provider name, or a direct 'provider:model' spec
        #[arg(long)]
        provider: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum HistoryCmd {
    /// List past exchanges, newest first
    List {
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
    /// Show one exchange in full, including chain steps
    Show {
        key: String,
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
    /// Attach a rating (and optional feedback) to an exchange
    Rate {
        key: String,
        /// 1 = poor, 5 = excellent
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        feedback: Option<String>,
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
    /// Delete an exchange by key
    Delete {
        key: String,
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
    /// Export an exchange to a file
    Export {
        key: String,
        #[arg(long, value_enum, default_value = "txt")]
        format: ExportFormat,
        /// Output file path
        #[arg(long)]
        out: String,
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TeamCmd {
    /// Copy one of your logged exchanges into the team's shared space
    Share {
        key: String,
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
    /// List exchanges shared with your team
    List {
        #[arg(long, env = "AUTOPROMPT_USER")]
        user: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportFormat {
    Txt,
    Json,
}
