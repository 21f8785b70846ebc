use clap::Subcommand;

use crate::cli::{config, utils, OutputFormat};

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check that the API server is reachable")]
    Ping,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = config::client();

    match cmd {
        ServerCommands::Ping => match client.health().await {
            Ok(value) => utils::output_value(&output_format, &value),
            Err(e) => utils::output_error(&output_format, &e.to_string()),
        },
    }
}
