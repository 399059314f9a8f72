use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value;

use confgit_remote::{ConfigRemote, DirRemote};
use confgit_render::{FilesystemResolver, JsonEngine, TemplateRenderer};
use confgit_server::{ConfigServer, ServerConfig};
use confgit_source::{ConfigSource, SourceOptions};
use confgit_types::ContentType;

use crate::cli::{Cli, Command, EnvironmentsArgs, RenderArgs, ServeArgs, SourceArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Render(args) => cmd_render(args).await,
        Command::Environments(args) => cmd_environments(args).await,
    }
}

fn build_source(args: &SourceArgs) -> Arc<ConfigSource> {
    let remote = Arc::new(DirRemote::new(&args.root)) as Arc<dyn ConfigRemote>;
    let options = SourceOptions::new()
        .with_environment(args.env.clone())
        .with_file_extension(args.extension.clone())
        .with_fetch_ttl(Duration::from_secs(args.ttl))
        .with_fetch_timeout(Duration::from_secs(args.timeout));
    Arc::new(ConfigSource::new(remote, options))
}

fn build_renderer() -> TemplateRenderer {
    TemplateRenderer::new(Arc::new(JsonEngine::new()))
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let bind_addr: SocketAddr = args
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", args.bind))?;
    let source = build_source(&args.source);

    println!(
        "{} serving {} on {}",
        "✓".green().bold(),
        source.remote_url().bold(),
        args.bind.yellow()
    );
    let server = ConfigServer::new(ServerConfig { bind_addr }, source, build_renderer());
    server.serve().await?;
    Ok(())
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let overlay: Option<Value> = args
        .data
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("--data must be valid JSON")?;

    let source = build_source(&args.source);
    let tree = source.filesystem_for(&args.source.env).await?;
    let resolver = FilesystemResolver::new(tree);
    let entry = source.namespace_path(&args.namespace);

    let document = build_renderer().render(
        &resolver,
        &entry,
        ContentType::parse(&args.format),
        overlay.as_ref(),
    )?;
    // The document alone on stdout; everything else goes to stderr/logs.
    println!("{document}");
    Ok(())
}

async fn cmd_environments(args: EnvironmentsArgs) -> anyhow::Result<()> {
    let source = build_source(&args.source);
    let environments = source.environments().await?;
    if environments.is_empty() {
        println!("No environments.");
        return Ok(());
    }
    for environment in environments {
        if environment == args.source.env {
            println!("* {}", environment.green().bold());
        } else {
            println!("  {environment}");
        }
    }
    Ok(())
}
