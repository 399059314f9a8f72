use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "confgit",
    about = "ConfGit — git-backed configuration distribution cache",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve rendered configuration over HTTP
    Serve(ServeArgs),
    /// Render a namespace once and print the document
    Render(RenderArgs),
    /// List known environments
    Environments(EnvironmentsArgs),
}

/// Where configuration comes from and how the cache treats it.
#[derive(Args)]
pub struct SourceArgs {
    /// Local configuration root, one subdirectory per environment
    #[arg(long)]
    pub root: PathBuf,

    /// Environment (branch) to select
    #[arg(long, default_value = "master")]
    pub env: String,

    /// Template filename extension
    #[arg(long, default_value = "jsonnet")]
    pub extension: String,

    /// Seconds reference data stays fresh before the next fetch
    #[arg(long, default_value = "10")]
    pub ttl: u64,

    /// Per-attempt fetch deadline in seconds
    #[arg(long, default_value = "2")]
    pub timeout: u64,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Namespace to render (resolves to <namespace>.<extension>)
    pub namespace: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: String,

    /// JSON overlay merged on top of the rendered document
    #[arg(long)]
    pub data: Option<String>,
}

#[derive(Args)]
pub struct EnvironmentsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
