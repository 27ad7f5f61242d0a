//! In-memory sink for tests and embedded inspection.

use std::sync::Mutex;

use crate::log::span::RecordBatch;
use crate::sink::Sink;

/// Sink that buffers every batch in memory instead of transmitting it.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<RecordBatch>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every batch received so far, clearing the buffer.
    pub fn take(&self) -> Vec<RecordBatch> {
        std::mem::take(&mut self.batches.lock().expect("memory sink mutex poisoned"))
    }

    /// Number of batches currently buffered.
    pub fn len(&self) -> usize {
        self.batches.lock().expect("memory sink mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn send(&self, batch: RecordBatch) {
        self.batches
            .lock()
            .expect("memory sink mutex poisoned")
            .push(batch);
    }
}
