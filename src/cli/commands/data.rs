use clap::Subcommand;
use serde_json::Value;

use crate::cli::{config, utils, OutputFormat};

#[derive(Subcommand)]
pub enum DataCommands {
    #[command(about = "List all records in a collection")]
    List {
        #[arg(help = "Collection name (plural), e.g. users, tasks, projects")]
        collection: String,

        #[arg(long, help = "Workspace id override")]
        workspace: Option<i64>,
    },

    #[command(about = "Fetch a single record by id")]
    Get {
        #[arg(help = "Collection name (plural)")]
        collection: String,

        #[arg(help = "Record id")]
        id: i64,
    },

    #[command(about = "Create a record from a JSON body")]
    Create {
        #[arg(help = "Collection name (plural)")]
        collection: String,

        #[arg(long, help = "Record body as a JSON object")]
        json: String,

        #[arg(long, help = "Workspace id override")]
        workspace: Option<i64>,
    },

    #[command(about = "Update a record with a JSON patch")]
    Update {
        #[arg(help = "Collection name (plural)")]
        collection: String,

        #[arg(help = "Record id")]
        id: i64,

        #[arg(long, help = "Fields to change as a JSON object")]
        json: String,
    },

    #[command(about = "Delete a record by id")]
    Delete {
        #[arg(help = "Collection name (plural)")]
        collection: String,

        #[arg(help = "Record id")]
        id: i64,
    },
}

fn parse_body(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        anyhow::bail!("body must be a JSON object");
    }
    Ok(value)
}

pub async fn handle(cmd: DataCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = config::client();

    let result = match cmd {
        DataCommands::List { collection, workspace } => {
            client.list_raw(&collection, workspace).await
        }
        DataCommands::Get { collection, id } => client.get_raw(&collection, id).await,
        DataCommands::Create { collection, json, workspace } => {
            let body = parse_body(&json)?;
            client.create_raw(&collection, &body, workspace).await
        }
        DataCommands::Update { collection, id, json } => {
            let body = parse_body(&json)?;
            client.update_raw(&collection, id, &body).await
        }
        DataCommands::Delete { collection, id } => client.delete_raw(&collection, id).await,
    };

    match result {
        Ok(value) => utils::output_value(&output_format, &value),
        Err(e) => utils::output_error(&output_format, &e.to_string()),
    }
}
