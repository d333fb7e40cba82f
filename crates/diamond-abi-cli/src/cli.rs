use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "diamond-abi",
    about = "Merge compiled facet ABIs into a single EIP-2535 diamond ABI",
    version
)]
pub struct Cli {
    /// Log at debug level (overridden by DIAMOND_ABI_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge facet ABIs and write the configured outputs
    Merge {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the merged interface as human-readable signatures
    Signatures {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter diamond-abi.toml
    Init {
        /// Config file to create
        #[arg(default_value = "diamond-abi.toml")]
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Hardhat-style artifacts directory
    #[arg(long, default_value = "artifacts", conflicts_with = "manifest")]
    pub artifacts: String,

    /// JSON manifest of `{ fullyQualifiedName, abi }` entries (order is kept)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Config file (defaults to ./diamond-abi.toml when present)
    #[arg(long)]
    pub config: Option<String>,

    /// Diamond contract name
    #[arg(long)]
    pub name: Option<String>,

    /// Fail on duplicate function/event signatures
    #[arg(long)]
    pub strict: bool,

    /// Only merge modules matching this regex (repeatable)
    #[arg(long = "include")]
    pub include: Vec<String>,

    /// Skip modules matching this regex (repeatable, added to config)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Regex naming the module allowed to contribute the fallback
    #[arg(long)]
    pub fallback_owner: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Write the diamond artifact JSON here
    #[arg(long)]
    pub out_artifact: Option<String>,

    /// Write the flat merged ABI JSON here
    #[arg(long)]
    pub out_abi: Option<String>,

    /// Write human-readable signatures here
    #[arg(long)]
    pub out_signatures: Option<String>,

    /// JSON indent width (0 = compact)
    #[arg(long)]
    pub spacing: Option<usize>,
}
