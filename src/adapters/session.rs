use tokio::sync::broadcast;
use uuid::Uuid;

/// A session-state change worth telling the rest of the process about.
#[derive(Debug, Clone)]
pub enum SessionChange {
    SignedUp { user_id: Uuid },
    SignedIn { user_id: Uuid, email: Option<String> },
    SignedOut,
}

/// Publish/subscribe hub for session changes. Controllers publish after the
/// provider confirms; anyone needing to react subscribes. Sends to a hub with
/// no live subscribers are silently dropped.
#[derive(Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionChange>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn publish(&self, change: SessionChange) {
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.tx.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
