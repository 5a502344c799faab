//! # delve-stdio
//!
//! Scoped isolation of the process's standard output.
//!
//! [`isolate`] runs a future with fd 1 redirected into a private buffer,
//! restores the real stream afterwards no matter how the future ends, and
//! logs what was suppressed. Nothing written inside the region reaches the
//! real stdout; it escapes only through the future's value or the log record
//! (which goes to stderr).

use std::fmt;

mod capture;
mod classify;
mod error;

pub use capture::StdoutCapture;
pub use classify::{Classification, EXCERPT_CHARS, FAILURE_TOKENS, classify, excerpt, report};
pub use error::IsolationError;

/// Outcome of a guarded region.
#[derive(Debug)]
pub struct Isolated<T> {
    /// What the guarded body returned.
    pub value: T,
    /// Everything written to stdout while the region was active.
    pub captured: String,
}

/// Run `body` with stdout redirected, then restore it and classify the
/// captured output.
///
/// # Errors
///
/// Returns [`IsolationError`] if stdout cannot be redirected before the body
/// runs (the body is then never polled) or cannot be restored afterwards.
/// In the latter case the captured output and the discarded value are
/// logged first.
pub async fn isolate<F>(body: F) -> Result<Isolated<F::Output>, IsolationError>
where
    F: Future,
    F::Output: fmt::Debug,
{
    let capture = StdoutCapture::begin()?;
    let value = body.await;
    settle(value, capture.finish())
}

fn settle<T: fmt::Debug>(
    value: T,
    finished: Result<String, IsolationError>,
) -> Result<Isolated<T>, IsolationError> {
    match finished {
        Ok(captured) => {
            report(&captured);
            Ok(Isolated { value, captured })
        }
        Err(error) => {
            if let IsolationError::Restore { captured, .. } = &error {
                report(captured);
            }
            tracing::error!(
                %error,
                discarded = ?value,
                "guarded region could not be closed, discarding its result"
            );
            Err(error)
        }
    }
}
