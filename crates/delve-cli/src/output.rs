//! The result protocol: one JSON document per run, on the right stream,
//! with the matching exit code.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use delve_core::{ErrorEnvelope, Finding};

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    Success(Box<Finding>),
    Failure(ErrorEnvelope),
}

impl Outcome {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Success(_) => 0,
            Self::Failure(_) => 1,
        }
    }
}

/// Render an outcome to the single document it produces.
///
/// Findings are pretty-printed; error envelopes are compact.
pub fn render(outcome: &Outcome) -> anyhow::Result<String> {
    match outcome {
        Outcome::Success(finding) => Ok(serde_json::to_string_pretty(finding)?),
        Outcome::Failure(envelope) => Ok(serde_json::to_string(envelope)?),
    }
}

/// Write the outcome's document: findings to `success`, envelopes to
/// `failure`. Nothing is written to the other stream.
pub fn write_outcome(
    outcome: &Outcome,
    success: &mut impl Write,
    failure: &mut impl Write,
) -> anyhow::Result<()> {
    let rendered = render(outcome)?;
    let stream: &mut dyn Write = match outcome {
        Outcome::Success(_) => success,
        Outcome::Failure(_) => failure,
    };
    writeln!(stream, "{rendered}").context("failed to write result document")?;
    stream.flush().context("failed to flush result document")?;
    Ok(())
}

/// Emit the outcome on the process streams and return the exit code.
pub fn emit(outcome: &Outcome) -> ExitCode {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match write_outcome(outcome, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(()) => ExitCode::from(outcome.exit_code()),
        Err(error) => {
            tracing::error!(error = format!("{error:#}"), "failed to emit result");
            ExitCode::FAILURE
        }
    }
}
