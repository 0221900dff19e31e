use std::sync::atomic::{AtomicU64, Ordering};

const MB: u64 = 1024 * 1024;

/// Running totals shared by every filler and the reporter.
///
/// Both values are updated with relaxed atomics: no increment is lost, but a
/// reader may observe one counter ahead of the other.
#[derive(Debug, Default)]
pub struct Counters {
    bytes: AtomicU64,
    files: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_bytes(&self, bytes: u64) {
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }
    pub fn file_created(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }
    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
    /// total written so far, 1 MB being 1024 * 1024 bytes
    pub fn megabytes(&self) -> f64 {
        self.bytes() as f64 / MB as f64
    }
    /// files created since the last reset
    pub fn files(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }
    pub fn reset_files(&self) {
        self.files.store(0, Ordering::Relaxed);
    }
}
