use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast that hides itself after `Notification::DISPLAY_FOR`.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    pub const DISPLAY_FOR_MILLIS: i64 = 3000;

    pub fn success(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(message, NotificationKind::Success, now)
    }

    pub fn error(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(message, NotificationKind::Error, now)
    }

    fn new(message: impl Into<String>, kind: NotificationKind, now: DateTime<Utc>) -> Self {
        Notification {
            message: message.into(),
            kind,
            shown_at: now,
        }
    }

    pub fn hides_at(&self) -> DateTime<Utc> {
        self.shown_at + Duration::milliseconds(Self::DISPLAY_FOR_MILLIS)
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.hides_at()
    }
}
