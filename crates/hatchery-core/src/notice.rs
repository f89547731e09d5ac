//! Single-slot transient notifications.
//!
//! A new notice replaces whatever is shown. Each notice removes itself
//! after [`NOTICE_TTL`] unless it has been replaced or dismissed first.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hatchery_types::{Notice, NoticeKind};
use tokio::sync::RwLock;

/// How long a notice stays visible without user action.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Holder of the current notice.
///
/// Requires a Tokio runtime: [`notify`](Self::notify) spawns the
/// auto-dismiss timer.
#[derive(Debug, Default)]
pub struct Notifier {
    slot: Arc<RwLock<Option<Notice>>>,
    next_id: AtomicU64,
}

impl Notifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice, replacing the current one. Returns its id.
    pub async fn notify(&self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notice = Notice {
            id,
            kind,
            message: message.into(),
        };
        *self.slot.write().await = Some(notice);

        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            let mut current = slot.write().await;
            if current.as_ref().is_some_and(|shown| shown.id == id) {
                *current = None;
            }
        });

        id
    }

    /// The notice currently shown, if any.
    pub async fn current(&self) -> Option<Notice> {
        self.slot.read().await.clone()
    }

    /// Clear the slot.
    pub async fn dismiss(&self) {
        *self.slot.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notice_expires_after_ttl() {
        let notifier = Notifier::new();
        notifier.notify(NoticeKind::Success, "hatched").await;
        assert!(notifier.current().await.is_some());

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(notifier.current().await.is_some());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(notifier.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notice_survives_older_timer() {
        let notifier = Notifier::new();
        notifier.notify(NoticeKind::Error, "first").await;

        tokio::time::sleep(Duration::from_secs(3)).await;
        let second = notifier.notify(NoticeKind::Warning, "second").await;

        // First notice's timer fires here; the second must stay.
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let shown = notifier.current().await;
        assert_eq!(shown.as_ref().map(|n| n.id), Some(second));
        assert_eq!(shown.map(|n| n.message).as_deref(), Some("second"));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(notifier.current().await, None);
    }

    #[tokio::test]
    async fn dismiss_clears_immediately() {
        let notifier = Notifier::new();
        notifier.notify(NoticeKind::Success, "ok").await;
        notifier.dismiss().await;
        assert_eq!(notifier.current().await, None);
    }

    #[tokio::test]
    async fn ids_increase() {
        let notifier = Notifier::new();
        let a = notifier.notify(NoticeKind::Success, "a").await;
        let b = notifier.notify(NoticeKind::Success, "b").await;
        assert!(b > a);
    }
}
