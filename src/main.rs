use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use giftgenix::admin::AdminGate;
use giftgenix::client::HttpGenerationClient;
use giftgenix::config::{Config, Overrides};
use giftgenix::error::Result;
use giftgenix::interfaces::notice::Notifier;
use giftgenix::interfaces::service::{Credentials, GenerationService};
use giftgenix::logging;
use giftgenix::markdown::TerminalStyle;
use giftgenix::notice::Notice;
use giftgenix::prompt::{PromptController, ResultSource, SubmitOutcome};

#[derive(Parser, Debug)]
#[command(name = "giftgenix")]
#[command(about = "Ask the GiftGenix service for gift ideas and manage its API key")]
struct Cli {
    /// JSON config file with an `api` section.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, env = "GIFTGENIX_API_URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe the recipient and print the suggestions.
    Generate {
        /// Print the suggestions as an HTML fragment.
        #[arg(long, conflicts_with = "plain")]
        html: bool,

        /// Disable terminal styling.
        #[arg(long)]
        plain: bool,

        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Log in as admin, replace the service API key, and log out.
    UpdateKey {
        #[arg(long)]
        username: String,

        #[arg(long, env = "GIFTGENIX_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, env = "GIFTGENIX_NEW_KEY", hide_env_values = true)]
        new_key: String,
    },
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{notice}");
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        timeout_seconds: cli.timeout,
    };
    Config::load(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &overrides,
    )
}

/// 2 for an empty prompt, 1 when the service could not be reached.
fn generate_exit_code(outcome: SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Rejected => 2,
        SubmitOutcome::Completed(ResultSource::TransportError) => 1,
        _ => 0,
    }
}

async fn run_generate(
    service: Arc<dyn GenerationService>,
    prompt: Vec<String>,
    html: bool,
    plain: bool,
) -> ExitCode {
    let controller = PromptController::new(service, Arc::new(TerminalNotifier));
    let outcome = controller.submit_text(prompt.join(" ")).await;

    let output = if html {
        controller.rendered_html().await
    } else {
        let style = if plain || !std::io::stdout().is_terminal() {
            TerminalStyle::Plain
        } else {
            TerminalStyle::Ansi
        };
        controller.rendered_terminal(style).await
    };
    if let Some(output) = output {
        println!("{output}");
    }

    ExitCode::from(generate_exit_code(outcome))
}

async fn run_update_key(
    service: Arc<dyn GenerationService>,
    username: String,
    password: String,
    new_key: String,
) -> Result<ExitCode> {
    let gate = AdminGate::new(service, Arc::new(TerminalNotifier));
    let state = gate.login(Credentials::new(username, password)).await?;
    if !state.is_authenticated() {
        return Ok(ExitCode::FAILURE);
    }
    gate.update_key(new_key).await?;
    gate.logout().await;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    logging::init_tracing("giftgenix_cli");
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let service: Arc<dyn GenerationService> =
        Arc::new(HttpGenerationClient::new(config.api.clone())?);

    match cli.command {
        Command::Generate {
            html,
            plain,
            prompt,
        } => Ok(run_generate(service, prompt, html, plain).await),
        Command::UpdateKey {
            username,
            password,
            new_key,
        } => run_update_key(service, username, password, new_key).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_exit_codes() {
        assert_eq!(generate_exit_code(SubmitOutcome::Rejected), 2);
        assert_eq!(
            generate_exit_code(SubmitOutcome::Completed(ResultSource::TransportError)),
            1
        );
        for source in [
            ResultSource::Result,
            ResultSource::ServiceError,
            ResultSource::Empty,
        ] {
            assert_eq!(generate_exit_code(SubmitOutcome::Completed(source)), 0);
        }
        assert_eq!(generate_exit_code(SubmitOutcome::Busy), 0);
    }

    #[test]
    fn cli_flags_parse_into_overrides() {
        let cli = Cli::try_parse_from([
            "giftgenix",
            "--base-url",
            "https://flag.example",
            "--timeout",
            "4",
            "generate",
            "hiker",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.api.base_url, "https://flag.example");
        assert_eq!(config.api.timeout_seconds, Some(4));
    }
}
