//! In-memory notification records.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

/// A recorded event.
///
/// `related_id` points at whatever record triggered the event (an order id
/// for `order_created`), by convention only. Records are append-only and
/// never mutated after creation.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: i64,
    pub related_id: i64,
    pub event_type: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct NotificationStoreState {
    notifications: Vec<Notification>,
    next_id: i64,
}

/// In-memory notification store. Append-only, sequential ids from 1.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    state: Arc<RwLock<NotificationStoreState>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification, stamping it with the current time.
    pub fn record(&self, related_id: i64, event_type: String, message: String) -> Notification {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let notification = Notification {
            id: state.next_id,
            related_id,
            event_type,
            message,
            timestamp: Utc::now(),
        };
        state.notifications.push(notification.clone());
        notification
    }

    /// All notifications, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.state.read().unwrap().notifications.clone()
    }

    /// Number of recorded notifications.
    pub fn count(&self) -> usize {
        self.state.read().unwrap().notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_assigns_sequential_ids_and_timestamps() {
        let store = NotificationStore::new();

        let first = store.record(7, "order_created".into(), "first".into());
        let second = store.record(8, "order_created".into(), "second".into());

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.timestamp >= first.timestamp);
        assert_eq!(store.count(), 2);
    }
}
