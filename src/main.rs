use anyhow::Result;
use clap::Parser;
use tracing::info;

use agentlink::cli::{Cli, Commands, ConfigCommands};
use agentlink::config::{get_config, init_config, init_config_from};
use agentlink::errors::AgentlinkError;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.config.as_deref() {
        Some(path) => init_config_from(path),
        None => init_config(),
    }

    let outcome = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Score { file } => {
            let config = get_config();
            agentlink::cli::score_answers(file.as_deref(), &config.scoring).and_then(|result| {
                println!("{}", serde_json::to_string_pretty(&result)?);
                Ok(())
            })
        }
        Commands::Config {
            action: ConfigCommands::Generate { output },
        } => agentlink::cli::generate_config(output.as_deref()).map(|sample| {
            if let Some(sample) = sample {
                println!("{}", sample);
            }
        }),
        Commands::StatusMap { text } => {
            let (status, lower) = agentlink::cli::status_map(&text);
            println!("{} ({})", status, lower);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    Ok(())
}

async fn serve() -> Result<(), AgentlinkError> {
    let config = get_config();
    let _guard = agentlink::system::init_logging(&config.logging)?;
    info!("agentlink {} starting", env!("CARGO_PKG_VERSION"));

    agentlink::api::server::run_server(&config).await
}
