//! `localess` binary entry point.

use clap::Parser;
use localess::commands;
use localess::{Cli, Commands, ContentCommands, SchemaCommands, Services, EXIT_FAILURE};
use localess_config::ConfigProvider;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(
            "localess=debug,localess_api=debug,localess_config=debug,localess_fields=debug,\
             localess_publish=debug,localess_store=debug,tower_http=debug",
        )
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = ConfigProvider::new().with_file(cli.config).load()?;
    let services = Services::from_config(config);
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Serve => commands::serve(&services).await,
        Commands::Publish {
            space_id,
            description,
        } => commands::publish(&services, &space_id, description, &mut out).await,
        Commands::Schema { command } => match command {
            SchemaCommands::List { space_id } => {
                commands::schema_list(&services, &space_id, &mut out).await
            }
            SchemaCommands::Show {
                space_id,
                schema_id,
            } => commands::schema_show(&services, &space_id, &schema_id, &mut out).await,
            SchemaCommands::Check {
                space_id,
                schema_id,
            } => commands::schema_check(&services, &space_id, &schema_id, &mut out).await,
        },
        Commands::Content { command } => match command {
            ContentCommands::Check {
                space_id,
                content_id,
            } => commands::content_check(&services, &space_id, &content_id, &mut out).await,
        },
    }
}
