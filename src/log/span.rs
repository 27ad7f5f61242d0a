//! Span and record types emitted to the collector.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finished, named, timed unit of work.
///
/// Immutable once closed; `end >= start` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Short identifying name (e.g. "request processing").
    pub name: String,

    /// Nesting level, 0 for a top-level span.
    pub depth: u32,

    /// Index among spans at the same depth; strictly increasing per depth
    /// within one request, never reset.
    pub sequence: u64,

    /// Start timestamp, nanoseconds since the owning log's clock origin.
    pub start: u64,

    /// End timestamp, same base as `start`.
    pub end: u64,
}

impl Span {
    /// Duration in nanoseconds.
    pub fn duration_nanos(&self) -> u64 {
        self.end - self.start
    }
}

/// One entry in an emitted batch: either a closed span or a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Span(Span),
    Message {
        /// Index among messages within one request, insertion order.
        sequence: u64,
        /// Nanoseconds since the owning log's clock origin.
        timestamp: u64,
        text: String,
    },
}

/// The ordered set of records for one request, the unit a sink transmits.
///
/// Records appear in emission order: messages at append time, spans at close
/// time. Batches from different requests may interleave arbitrarily at the
/// collector; within one batch the order is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordBatch {
    /// Owning request identifier.
    pub request_id: Uuid,

    /// Wall-clock anchor for the batch, Unix-epoch milliseconds.
    pub started_at: u64,

    pub records: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_shape() {
        let span = Record::Span(Span {
            name: "view rendering".into(),
            depth: 1,
            sequence: 0,
            start: 100,
            end: 250,
        });
        let value = serde_json::to_value(&span).unwrap();
        assert_eq!(value["kind"], "span");
        assert_eq!(value["name"], "view rendering");
        assert_eq!(value["depth"], 1);

        let msg = Record::Message {
            sequence: 3,
            timestamp: 42,
            text: "cache miss".into(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["kind"], "message");
        assert_eq!(value["text"], "cache miss");
    }

    #[test]
    fn test_span_duration() {
        let span = Span {
            name: "db".into(),
            depth: 0,
            sequence: 0,
            start: 10,
            end: 30,
        };
        assert_eq!(span.duration_nanos(), 20);
    }
}
