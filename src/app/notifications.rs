//! Toast notifications surfaced after form submissions and failures

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::constants::MAX_NOTIFICATIONS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded queue of toasts, newest last
#[derive(Clone, Debug)]
pub struct Notifications {
    items: VecDeque<Notification>,
    ttl: chrono::Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Notifications {
            items: VecDeque::with_capacity(MAX_NOTIFICATIONS),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365)),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message.into(), Utc::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into(), Utc::now());
    }

    fn push(&mut self, kind: NotificationKind, message: String, created_at: DateTime<Utc>) {
        if self.items.len() >= MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            kind,
            message,
            created_at,
        });
    }

    /// Drop toasts older than the TTL. Returns true if any were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items.retain(|n| now - n.created_at < ttl);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let mut toasts = Notifications::new(Duration::from_secs(4));
        let start = Utc::now();
        toasts.push(NotificationKind::Success, "sent".into(), start);
        toasts.push(NotificationKind::Error, "failed".into(), start + chrono::Duration::seconds(3));

        assert!(!toasts.expire(start + chrono::Duration::seconds(2)));
        assert_eq!(toasts.len(), 2);

        assert!(toasts.expire(start + chrono::Duration::seconds(5)));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.latest().map(|n| n.kind), Some(NotificationKind::Error));
    }

    #[test]
    fn test_bounded() {
        let mut toasts = Notifications::new(Duration::from_secs(60));
        for i in 0..(MAX_NOTIFICATIONS + 2) {
            toasts.error(format!("error {}", i));
        }
        assert_eq!(toasts.len(), MAX_NOTIFICATIONS);
        assert_eq!(toasts.iter().next().map(|n| n.message.as_str()), Some("error 2"));
    }
}
