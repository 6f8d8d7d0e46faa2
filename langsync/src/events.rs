//! Structured progress events emitted by the reconciliation engine.
//!
//! The engine owns no display state. Hosts subscribe by passing an
//! [`EventSink`]: a closure, a `Vec` collecting events, or a channel sender.

use std::{path::PathBuf, sync::mpsc};

use crate::language::LanguageTag;

/// One step of a sync run, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    RunStarted {
        master: PathBuf,
        targets: usize,
    },
    MasterLoaded {
        master: PathBuf,
        keys: usize,
    },
    FileStarted {
        path: PathBuf,
        language: LanguageTag,
    },
    MissingKeys {
        path: PathBuf,
        count: usize,
    },
    KeyTranslated {
        path: PathBuf,
        key: String,
        index: usize,
        total: usize,
    },
    /// The provider failed; the key was filled with the source text instead.
    KeyFailed {
        path: PathBuf,
        key: String,
        error: String,
    },
    FileSkipped {
        path: PathBuf,
        reason: String,
    },
    FileCompleted {
        path: PathBuf,
        translated: usize,
        failed: usize,
        written: bool,
    },
    RunCompleted {
        updated: usize,
        up_to_date: usize,
        skipped: usize,
        translated: usize,
    },
}

/// Receiver of [`SyncEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: SyncEvent);
}

impl<F> EventSink for F
where
    F: FnMut(SyncEvent),
{
    fn emit(&mut self, event: SyncEvent) {
        self(event)
    }
}

impl EventSink for Vec<SyncEvent> {
    fn emit(&mut self, event: SyncEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<SyncEvent> {
    fn emit(&mut self, event: SyncEvent) {
        // A dropped receiver only means nobody is listening any more.
        let _ = self.send(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SyncEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> SyncEvent {
        SyncEvent::RunStarted {
            master: PathBuf::from("en.json"),
            targets: 2,
        }
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = 0;
        let mut sink = |_event: SyncEvent| seen += 1;
        sink.emit(started());
        sink.emit(started());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_vec_sink() {
        let mut events: Vec<SyncEvent> = Vec::new();
        events.emit(started());
        assert_eq!(events, vec![started()]);
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (mut tx, rx) = mpsc::channel();
        tx.emit(started());
        assert_eq!(rx.recv().unwrap(), started());
        drop(rx);
        tx.emit(started());
    }
}
