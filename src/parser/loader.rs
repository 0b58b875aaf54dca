//! Time-bounded document loading with fallback candidates.
//!
//! Loading a hostile or very large PDF can take arbitrarily long, so every
//! load runs on a worker thread and the caller waits on a channel with a
//! deadline. A [`LoaderChain`] tries its candidates in order and moves on to
//! the next one only for failures another loader might get past.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use super::backend::{LopdfBackend, PdfBackend};
use super::options::DEFAULT_LOAD_TIMEOUT;
use crate::error::{Error, Result};

/// Strategy for turning PDF bytes into a [`PdfBackend`].
pub trait DocumentLoader: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Load a document.
    fn load(&self, data: &[u8]) -> Result<Box<dyn PdfBackend>>;
}

/// Loader backed by lopdf.
#[derive(Debug, Clone, Default)]
pub struct LopdfLoader {
    trim_trailing: bool,
}

impl LopdfLoader {
    /// Load the bytes as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop anything after the last `%%EOF` marker before loading.
    ///
    /// Upload pipelines and mail gateways sometimes append junk that trips
    /// the cross-reference lookup.
    pub fn trimming() -> Self {
        Self {
            trim_trailing: true,
        }
    }
}

impl DocumentLoader for LopdfLoader {
    fn name(&self) -> &str {
        if self.trim_trailing {
            "lopdf-trimmed"
        } else {
            "lopdf"
        }
    }

    fn load(&self, data: &[u8]) -> Result<Box<dyn PdfBackend>> {
        let data = if self.trim_trailing {
            trim_after_eof(data)
        } else {
            data
        };
        Ok(Box::new(LopdfBackend::load_bytes(data)?))
    }
}

/// Slice `data` up to and including the last `%%EOF` marker.
fn trim_after_eof(data: &[u8]) -> &[u8] {
    const EOF: &[u8] = b"%%EOF";
    data.windows(EOF.len())
        .rposition(|w| w == EOF)
        .map(|pos| &data[..pos + EOF.len()])
        .unwrap_or(data)
}

/// Ordered loader candidates, each bounded by a timeout.
#[derive(Clone)]
pub struct LoaderChain {
    loaders: Vec<Arc<dyn DocumentLoader>>,
    timeout: Duration,
}

impl LoaderChain {
    /// Empty chain with the given per-candidate timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            loaders: Vec::new(),
            timeout,
        }
    }

    /// The standard chain: lopdf as-is, then lopdf on trimmed input.
    pub fn standard(timeout: Duration) -> Self {
        Self::new(timeout)
            .with_loader(LopdfLoader::new())
            .with_loader(LopdfLoader::trimming())
    }

    /// Append a candidate.
    pub fn with_loader<L: DocumentLoader + 'static>(mut self, loader: L) -> Self {
        self.loaders.push(Arc::new(loader));
        self
    }

    /// Per-candidate timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Check if the chain has no candidates.
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Load a document, falling back to the next candidate on retryable
    /// failures.
    pub fn load(&self, data: &[u8]) -> Result<Box<dyn PdfBackend>> {
        let data: Arc<[u8]> = Arc::from(data);
        let mut last_error =
            Error::BackendUnavailable("no document loader configured".to_string());

        for (i, loader) in self.loaders.iter().enumerate() {
            match load_with_timeout(Arc::clone(loader), Arc::clone(&data), self.timeout) {
                Ok(backend) => {
                    log::debug!("Loaded document with {}", loader.name());
                    return Ok(backend);
                }
                Err(e) if e.is_retryable_load() && i + 1 < self.loaders.len() => {
                    log::warn!("Loader {} failed ({}); trying next candidate", loader.name(), e);
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}

impl Default for LoaderChain {
    fn default() -> Self {
        Self::standard(DEFAULT_LOAD_TIMEOUT)
    }
}

impl std::fmt::Debug for LoaderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderChain")
            .field(
                "loaders",
                &self.loaders.iter().map(|l| l.name()).collect::<Vec<_>>(),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Run one load on a worker thread and wait at most `timeout` for it.
///
/// A load that overruns is abandoned; its thread finishes in the background
/// and the result is dropped.
fn load_with_timeout(
    loader: Arc<dyn DocumentLoader>,
    data: Arc<[u8]>,
    timeout: Duration,
) -> Result<Box<dyn PdfBackend>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let name = loader.name().to_string();

    std::thread::Builder::new()
        .name(format!("pdf-load-{}", name))
        .spawn(move || {
            let _ = tx.send(loader.load(&data));
        })
        .map_err(|e| Error::BackendUnavailable(format!("could not start loader: {}", e)))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            log::warn!("Loader {} timed out after {:?}", name, timeout);
            Err(Error::Timeout(timeout))
        }
        Err(RecvTimeoutError::Disconnected) => Err(Error::BackendUnavailable(format!(
            "loader {} exited without a result",
            name
        ))),
    }
}
