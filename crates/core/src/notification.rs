// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a success notification stays visible.
pub const SUCCESS_AUTO_DISMISS: Duration = Duration::from_secs(3);

/// The kind of a transient user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A write is in flight. Stays until replaced.
    Loading,
    /// A write completed. Dismissed automatically.
    Success,
    /// A write failed and the change was rolled back. Dismissed manually.
    Error,
}

impl NotificationKind {
    /// Returns how long the notification stays up before it is dismissed
    /// automatically, or `None` if it stays until cleared.
    #[must_use]
    pub const fn auto_dismiss(self) -> Option<Duration> {
        match self {
            Self::Success => Some(SUCCESS_AUTO_DISMISS),
            Self::Loading | Self::Error => None,
        }
    }
}

/// A message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    #[must_use]
    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Loading,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Receives notifications emitted by the mutation controller.
///
/// Implementations must not block; the controller calls `notify` while it
/// holds the session.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}
