use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::kernel::{DocumentId, GroupId, LanguageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    DocumentAdded {
        group: GroupId,
        document: DocumentId,
    },
    DocumentClosed {
        group: GroupId,
        document: DocumentId,
    },
    GroupRemoved {
        group: GroupId,
    },
    CurrentDocumentChanged {
        group: GroupId,
        document: DocumentId,
    },
    DocumentSaved {
        document: DocumentId,
        path: PathBuf,
        copy_only: bool,
    },
    LanguageChanged {
        document: DocumentId,
        language: LanguageId,
    },
}

/// Fan-out of shell events to every live subscriber.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Sender<ShellEvent>>,
}

pub struct ShellEventReceiver {
    rx: Receiver<ShellEvent>,
}

pub fn event_bus() -> (EventBus, ShellEventReceiver) {
    let mut bus = EventBus::default();
    let rx = bus.subscribe();
    (bus, rx)
}

impl EventBus {
    pub fn subscribe(&mut self) -> ShellEventReceiver {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        ShellEventReceiver { rx }
    }

    pub fn emit(&mut self, event: ShellEvent) {
        tracing::trace!(?event, "shell event");
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl ShellEventReceiver {
    pub fn try_recv(&mut self) -> Result<ShellEvent, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn drain(&mut self) -> Vec<ShellEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
