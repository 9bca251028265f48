// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests: an instrumented backend and Docker
//! availability checks.

#![allow(dead_code)]

use hexkv::domain::{Document, KvError, Result, StoreLocation};
use hexkv::ports::{BackendFactory, KvBackend};
use hexkv::service::KvStore;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

/// Cached result of Docker availability check.
static DOCKER_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Checks if Docker is available on the system.
///
/// This check is cached after the first call.
pub fn is_docker_available() -> bool {
    *DOCKER_AVAILABLE.get_or_init(|| {
        std::process::Command::new("docker")
            .args(["ps"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

/// Prints a warning message that a test is skipped due to Docker being unavailable.
pub fn print_docker_unavailable_warning(test_name: &str) {
    eprintln!("\n⚠️  SKIPPED: {} - Docker is not available", test_name);
    eprintln!("   To run this test, ensure Docker is installed and running.");
    eprintln!("   Installation: https://docs.docker.com/get-docker/\n");
}

/// Counters and switches shared between a [`RecordingBackend`] and the test
/// that created it.
#[derive(Debug, Default)]
pub struct Probe {
    pub loads: AtomicUsize,
    pub dumps: AtomicUsize,
    pub fail_load: AtomicBool,
    pub fail_dump: AtomicBool,
}

impl Probe {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn dumps(&self) -> usize {
        self.dumps.load(Ordering::SeqCst)
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn fail_dumps(&self, fail: bool) {
        self.fail_dump.store(fail, Ordering::SeqCst);
    }
}

/// In-memory backend that counts loads and dumps and can be made to fail.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    document: Mutex<Document>,
    probe: Arc<Probe>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
            probe: Arc::default(),
        }
    }

    pub fn probe(&self) -> Arc<Probe> {
        Arc::clone(&self.probe)
    }

    /// Returns what was last dumped, without counting a load.
    pub fn snapshot(&self) -> Document {
        self.document.lock().unwrap().clone()
    }
}

impl KvBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn load(&self) -> Result<Document> {
        self.probe.loads.fetch_add(1, Ordering::SeqCst);
        if self.probe.fail_load.load(Ordering::SeqCst) {
            return Err(KvError::backend_msg("recording", "load refused"));
        }
        Ok(self.document.lock().unwrap().clone())
    }

    fn dump(&self, document: &Document) -> Result<()> {
        self.probe.dumps.fetch_add(1, Ordering::SeqCst);
        if self.probe.fail_dump.load(Ordering::SeqCst) {
            return Err(KvError::backend_msg("recording", "dump refused"));
        }
        *self.document.lock().unwrap() = document.clone();
        Ok(())
    }
}

impl BackendFactory for RecordingBackend {
    const SCHEME: &'static str = "recording";

    fn open(_location: &StoreLocation) -> Result<Self> {
        Ok(Self::new())
    }
}

/// Builds a store over a fresh [`RecordingBackend`] seeded with `document`.
pub fn recording_store(document: Document) -> (KvStore, Arc<Probe>) {
    let backend = RecordingBackend::with_document(document);
    let probe = backend.probe();
    let location = StoreLocation::parse("recording://test").unwrap();
    (KvStore::new(location, Box::new(backend)), probe)
}
