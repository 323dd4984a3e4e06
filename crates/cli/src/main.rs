//! Automation client for the concierge HTTP API.
//!
//! Runs in CI on tracking-issue events: reads a colon-delimited issue body
//! (argument or stdin), extracts the customer fields, and calls back into
//! the server with the shared key appended.

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

mod issue;

use issue::{parse_issue_body, required_field};

#[derive(Parser)]
#[command(name = "conciergectl")]
#[command(version, about = "Onboarding automation client")]
struct Cli {
    /// Base URL of the concierge server
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    url: String,

    /// Shared form key
    #[arg(long, env = "CONCIERGE_FORM_KEY", global = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the customer record and kick off deployment tracking
    Deploy {
        /// Issue body; read from stdin when omitted
        #[arg(long)]
        body: Option<String>,
    },
    /// Create the customer record directly, without filing an issue
    Create {
        #[arg(long)]
        body: Option<String>,
    },
    /// Update a customer's deployment status
    Status {
        /// New status value
        #[arg(long)]
        status: String,

        #[arg(long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let secret = cli
        .secret
        .clone()
        .context("no shared key given (--secret or CONCIERGE_FORM_KEY)")?;
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Deploy { body } => {
            let fields = parse_issue_body(&read_body(body)?);
            let name = required_field(&fields, "name")?;
            let motto = required_field(&fields, "motto")?;

            let response = client
                .post(format!("{}/deploy", cli.url))
                .json(&json!({"name": name, "motto": motto, "key": secret}))
                .send()
                .await
                .context("deploy request failed")?;

            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);

            if !status.is_success() {
                bail!("deploy failed with status {status}: {body}");
            }
            // /deploy reports a taken name as 200 with an error body
            if let Some(error) = body.get("error") {
                bail!("deploy rejected: {error}");
            }

            println!("deployed {name}");
        }
        Commands::Create { body } => {
            let fields = parse_issue_body(&read_body(body)?);
            let name = required_field(&fields, "name")?;
            let motto = required_field(&fields, "motto")?;

            let response = client
                .post(format!("{}/create", cli.url))
                .json(&json!({"name": name, "motto": motto, "key": secret}))
                .send()
                .await
                .context("create request failed")?;

            let status = response.status();
            if !status.is_success() {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                bail!("create failed with status {status}: {body}");
            }

            println!("created {name}");
        }
        Commands::Status { status, body } => {
            let fields = parse_issue_body(&read_body(body)?);
            let name = required_field(&fields, "name")?;

            let response = client
                .post(format!("{}/status", cli.url))
                .json(&json!({"name": name, "status": status, "key": secret}))
                .send()
                .await
                .context("status request failed")?;

            let http_status = response.status();
            if !http_status.is_success() {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                bail!("status update failed with status {http_status}: {body}");
            }

            println!("updated {name} to '{status}'");
        }
    }

    Ok(())
}

/// Use the given body, or read it from stdin.
fn read_body(body: Option<String>) -> Result<String> {
    match body {
        Some(body) => Ok(body),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read issue body from stdin")?;
            Ok(buf)
        }
    }
}
