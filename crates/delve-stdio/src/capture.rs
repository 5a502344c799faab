//! File-descriptor level stdout capture.
//!
//! While a [`StdoutCapture`] is alive, fd 1 points at an anonymous temporary
//! file, so writes from Rust code, C libraries, and inherited child processes
//! all land in the buffer instead of the real stream. Dropping the capture
//! restores the original descriptor on every exit path, unwinding included.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::IsolationError;

/// Serializes guarded regions. fd 1 is process-wide, so two live captures
/// would restore each other's descriptors out of order.
static REGION: Mutex<()> = Mutex::new(());

/// An active stdout redirection. Not reentrant: beginning a second capture on
/// the same thread while one is alive blocks forever.
pub struct StdoutCapture {
    inner: imp::Redirect,
    _region: MutexGuard<'static, ()>,
}

impl StdoutCapture {
    /// Point fd 1 at a fresh private buffer.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError`] if the buffer cannot be created or the
    /// descriptor cannot be swapped. stdout is untouched in that case.
    pub fn begin() -> Result<Self, IsolationError> {
        let region = REGION.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = io::stdout().flush() {
            tracing::debug!(%error, "stdout flush before capture failed");
        }
        let inner = imp::Redirect::install()?;
        Ok(Self {
            inner,
            _region: region,
        })
    }

    /// Restore the original stdout and return everything written while the
    /// capture was active.
    ///
    /// A buffer that cannot be read back is logged and reported as empty.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Restore`] carrying the captured text if fd 1
    /// could not be pointed back at the original stream. `Drop` retries once
    /// more.
    pub fn finish(mut self) -> Result<String, IsolationError> {
        let restored = self.inner.restore();
        let captured = self.inner.read_back().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to read captured stdout buffer");
            String::new()
        });
        match restored {
            Ok(()) => Ok(captured),
            Err(source) => Err(IsolationError::Restore { source, captured }),
        }
    }
}

impl Drop for StdoutCapture {
    fn drop(&mut self) {
        if let Err(error) = self.inner.restore() {
            tracing::error!(%error, "failed to restore stdout after guarded region");
        }
    }
}

fn read_all(buffer: &mut std::fs::File) -> io::Result<String> {
    buffer.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    buffer.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(unix)]
mod imp {
    use std::fs::File;
    use std::io::{self, Write};
    use std::os::fd::{AsFd, AsRawFd, OwnedFd, RawFd};

    use crate::error::IsolationError;

    pub struct Redirect {
        saved: Option<OwnedFd>,
        buffer: File,
    }

    impl Redirect {
        pub fn install() -> Result<Self, IsolationError> {
            let buffer = tempfile::tempfile().map_err(IsolationError::Buffer)?;
            let saved = io::stdout()
                .as_fd()
                .try_clone_to_owned()
                .map_err(IsolationError::Acquire)?;
            point_stdout_at(buffer.as_raw_fd()).map_err(IsolationError::Acquire)?;
            Ok(Self {
                saved: Some(saved),
                buffer,
            })
        }

        /// Idempotent. On failure the saved descriptor is kept so a later
        /// call can retry.
        pub fn restore(&mut self) -> io::Result<()> {
            let Some(saved) = self.saved.take() else {
                return Ok(());
            };
            if let Err(error) = io::stdout().flush() {
                tracing::debug!(%error, "stdout flush before restore failed");
            }
            if let Err(error) = point_stdout_at(saved.as_raw_fd()) {
                self.saved = Some(saved);
                return Err(error);
            }
            Ok(())
        }

        pub fn read_back(&mut self) -> io::Result<String> {
            super::read_all(&mut self.buffer)
        }
    }

    #[allow(unsafe_code)]
    fn point_stdout_at(source: RawFd) -> io::Result<()> {
        // SAFETY: `source` is borrowed from a descriptor owned by the caller
        // and stays open for the call; dup2 only replaces fd 1.
        let rc = unsafe { libc::dup2(source, libc::STDOUT_FILENO) };
        if rc == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use std::fs::File;
    use std::io;

    use crate::error::IsolationError;

    /// Pass-through on platforms without `dup2`: output is not captured.
    pub struct Redirect {
        buffer: File,
    }

    impl Redirect {
        pub fn install() -> Result<Self, IsolationError> {
            tracing::debug!("stdout capture is not supported on this platform");
            let buffer = tempfile::tempfile().map_err(IsolationError::Buffer)?;
            Ok(Self { buffer })
        }

        #[allow(clippy::unnecessary_wraps, clippy::unused_self)]
        pub fn restore(&mut self) -> io::Result<()> {
            Ok(())
        }

        pub fn read_back(&mut self) -> io::Result<String> {
            super::read_all(&mut self.buffer)
        }
    }
}
