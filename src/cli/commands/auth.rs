use std::io::{BufRead, Write};

use clap::Subcommand;
use serde_json::json;

use crate::cli::{config, utils, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the server")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and drop the stored session")]
    Logout,

    #[command(about = "Show the current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = config::client();

    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password()?,
            };
            match client.login(&email, &password).await {
                Ok(session) => utils::output_success(
                    &output_format,
                    &format!("Logged in as {}", email),
                    Some(json!({ "user": session.user })),
                ),
                Err(e) => utils::output_error(&output_format, &e.to_string()),
            }
        }
        AuthCommands::Logout => {
            // Clears the session locally even if the server call fails
            let result = client.logout().await;
            match result {
                Ok(()) => utils::output_success(&output_format, "Logged out", None),
                Err(e) => utils::output_error(&output_format, &e.to_string()),
            }
        }
        AuthCommands::Whoami => match client.profile().await {
            Ok(profile) => utils::output_value(&output_format, &profile),
            Err(e) => utils::output_error(&output_format, &e.to_string()),
        },
    }
}

fn prompt_password() -> anyhow::Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
