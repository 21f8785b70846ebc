use clap::Subcommand;
use serde_json::json;

use crate::cli::{config, utils, OutputFormat};

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    #[command(about = "List all workspaces")]
    List,

    #[command(about = "Show the current workspace")]
    Current,

    #[command(about = "Switch the current workspace")]
    Use {
        #[arg(help = "Workspace id")]
        id: i64,
    },
}

pub async fn handle(cmd: WorkspaceCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = config::client();

    match cmd {
        WorkspaceCommands::List => match client.get_workspaces(None).await {
            Ok(workspaces) => {
                utils::output_value(&output_format, &serde_json::to_value(workspaces)?)
            }
            Err(e) => utils::output_error(&output_format, &e.to_string()),
        },
        WorkspaceCommands::Current => {
            let current = client.workspace.current();
            utils::output_value(&output_format, &json!({ "current_workspace": current }))
        }
        WorkspaceCommands::Use { id } => match client.switch_workspace(id).await {
            Ok(workspace) => {
                let mut cli_config = config::load();
                cli_config.workspace = workspace.clone();
                config::save(&cli_config)?;
                utils::output_success(
                    &output_format,
                    &format!("Switched to workspace {} ({})", workspace.id, workspace.name),
                    None,
                )
            }
            Err(e) => utils::output_error(&output_format, &e.to_string()),
        },
    }
}
