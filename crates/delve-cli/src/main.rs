//! `delve`: run one research request and report it over the result protocol.
//!
//! ```text
//! delve '<instructions>' '<depth>'
//! ```
//!
//! Exactly one JSON document is written per run: the finding on stdout with
//! exit code 0, or an error envelope on stderr with exit code 1. Logs go to
//! stderr and never carry the result.

use std::process::ExitCode;

use clap::Parser;
use delve_core::ErrorEnvelope;
use delve_engine::{EngineBackend, Orchestrator};

mod cli;
mod logging;
mod output;
mod validate;

use output::Outcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = delve_config::DelveConfig::load_with_dotenv();
    let level = config
        .as_ref()
        .map_or(delve_config::DEFAULT_LOG_LEVEL, |config| config.log_level.as_str());
    if let Err(error) = logging::init_tracing(level) {
        eprintln!("delve: {error:#}");
    }

    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(&error),
    };

    let outcome = run(&cli.inputs, &config).await;
    output::emit(&outcome)
}

async fn run(
    inputs: &[String],
    config: &Result<delve_config::DelveConfig, delve_config::ConfigError>,
) -> Outcome {
    let (request, config) = match validate::validate(inputs, config) {
        Ok(validated) => validated,
        Err(envelope) => {
            tracing::debug!(error = envelope.error(), "invocation rejected");
            return Outcome::Failure(envelope);
        }
    };

    // Validation guarantees the credential is present.
    let credential = config.credential().unwrap_or_default();
    let mut orchestrator = Orchestrator::new(EngineBackend::select(config, credential));

    match orchestrator.conduct(&request).await {
        Ok(finding) => Outcome::Success(Box::new(finding)),
        Err(error) => {
            tracing::error!(%error, kind = error.kind(), "research failed");
            Outcome::Failure(ErrorEnvelope::failure(error.to_string(), error.kind()))
        }
    }
}

/// Anything clap rejects becomes the usage envelope.
fn handle_parse_error(error: &clap::Error) -> ExitCode {
    tracing::debug!(error = %error.render(), "argument parsing failed");
    output::emit(&Outcome::Failure(ErrorEnvelope::usage(validate::PROGRAM)))
}
