//! gist-mcp MCP Server & CLI (Rust)
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct Gist operations
//!
//! MCP tools: `create_gist`, `get_gist`, `update_gist`, `delete_gist`,
//! `list_gists`, `star_gist`, `unstar_gist`

mod cli;
mod error;
mod gist;
mod http;
mod logging;
mod mcp;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, GistCommand};
use error::{validate_gist_id, validate_page, validate_per_page, AppError};
use gist::{GistApi, GistClient};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let log_file = cli.log_file_path();
    logging::init_logging(logging::level_for(cli.verbose, cli.quiet), &log_file);

    // A missing token is fatal in both modes
    let token = cli.token.take().unwrap_or_default();
    let client = if cli.api_url == gist::client::GITHUB_API_URL {
        GistClient::new(&token)
    } else {
        GistClient::with_base_url(&token, &cli.api_url)
    };
    let client = match client {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_mode(client, &log_file).await,
        Some(Commands::Gist(command)) => run_cli_mode(&client, command).await,
    }
}

/// Run in CLI mode
async fn run_cli_mode(api: &dyn GistApi, command: GistCommand) -> Result<()> {
    match execute_command(api, command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("{} ({})", e, e.error_code());
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Execute one CLI command
async fn execute_command(api: &dyn GistApi, command: GistCommand) -> Result<String, AppError> {
    use tools::{comments, create, delete, fork, get, image, list, star};

    match command {
        GistCommand::Create(args) => {
            create::run_create_from_files(api, &args.files, &args.description, args.public).await
        }
        GistCommand::Get(args) => {
            validate_gist_id(&args.gist_id)?;
            match args.raw_url {
                Some(filename) => get::run_raw_url(api, &args.gist_id, &filename).await,
                None => get::run_get(api, &args.gist_id).await,
            }
        }
        GistCommand::Delete(args) => {
            validate_gist_id(&args.gist_id)?;
            delete::run_delete(api, &args.gist_id).await
        }
        GistCommand::List(args) => {
            validate_per_page(args.per_page)?;
            validate_page(args.page)?;
            list::run_list(api, args).await
        }
        GistCommand::Star(args) => {
            validate_gist_id(&args.gist_id)?;
            star::run_star(api, &args.gist_id).await
        }
        GistCommand::Unstar(args) => {
            validate_gist_id(&args.gist_id)?;
            star::run_unstar(api, &args.gist_id).await
        }
        GistCommand::Starred(args) => {
            validate_gist_id(&args.gist_id)?;
            star::run_starred(api, &args.gist_id).await
        }
        GistCommand::Fork(args) => {
            validate_gist_id(&args.gist_id)?;
            fork::run_fork(api, &args.gist_id).await
        }
        GistCommand::Comments(args) => {
            validate_gist_id(&args.gist_id)?;
            comments::run_list_comments(api, &args.gist_id).await
        }
        GistCommand::Comment(args) => {
            validate_gist_id(&args.gist_id)?;
            comments::run_add_comment(api, &args.gist_id, &args.body).await
        }
        GistCommand::UploadImage(args) => {
            image::run_upload_image(api, &args.path, args.name.as_deref()).await
        }
    }
}

/// Run in MCP server mode
async fn run_mcp_mode(client: GistClient, log_file: &std::path::Path) -> Result<()> {
    info!(
        "Starting gist-mcp v{} against {} (log file: {})",
        env!("CARGO_PKG_VERSION"),
        client.base_url(),
        log_file.display()
    );

    mcp::handle_stdio(Arc::new(client)).await?;

    Ok(())
}
