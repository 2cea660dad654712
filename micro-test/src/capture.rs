//! Diagnostic capture for the duration of a test run
//!
//! While a [`DiagnosticCapture`] is alive, panic reports are routed into an
//! in-memory [`ErrorSink`] instead of stderr, so a test body that panics (or
//! writes incidental diagnostics through a [`SinkHandle`]) does not pollute
//! the runner's report stream. The capture restores the previous panic hook
//! when dropped.

use std::io::{self, Write};
use std::panic;
use std::panic::PanicHookInfo;
use std::sync::{Arc, Mutex};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Shared byte buffer that collects diagnostic output emitted during a test.
///
/// Cloning is cheap; all clones view the same buffer.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a writer that appends into this sink.
    pub fn handle(&self) -> SinkHandle {
        SinkHandle {
            buf: Arc::clone(&self.buf),
        }
    }

    /// Currently buffered diagnostic output, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards all buffered output.
    pub fn drain(&self) {
        self.lock().clear();
    }

    fn append(&self, data: &[u8]) {
        self.lock().extend_from_slice(data);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        // A panic while a handle held the lock poisons it; the buffer itself
        // stays usable.
        self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// `io::Write` handle into an [`ErrorSink`].
pub struct SinkHandle {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for SinkHandle {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Scoped redirection of the process panic-report channel into an
/// [`ErrorSink`].
///
/// Process-wide resource: only one capture may be installed at a time.
pub struct DiagnosticCapture {
    sink: ErrorSink,
    previous: Option<PanicHook>,
}

impl DiagnosticCapture {
    /// Installs the capture, saving the current panic hook for restoration.
    pub fn install() -> Self {
        let sink = ErrorSink::new();
        let previous = panic::take_hook();
        let hook_sink = sink.clone();
        panic::set_hook(Box::new(move |info| {
            hook_sink.append(format!("{info}\n").as_bytes());
        }));
        Self {
            sink,
            previous: Some(previous),
        }
    }

    pub fn sink(&self) -> &ErrorSink {
        &self.sink
    }
}

impl Drop for DiagnosticCapture {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}
