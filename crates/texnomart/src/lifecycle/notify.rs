//! Creation notices: recipient resolution, delivery and the notifier that
//! ties them together.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use texnomart_core::lifecycle::{
    creation_notice, LifecycleError, Notification, NotificationSink, RecipientResolver, Result,
    Watched,
};
use texnomart_core::storage::UserRepository;

/// Sink that records notifications in the log instead of sending mail.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            subject = %notification.subject,
            from = %notification.from,
            recipients = notification.recipients.len(),
            body = %notification.body,
            "Notification dispatched"
        );
        Ok(())
    }
}

/// Fixed recipient list.
#[derive(Debug, Default, Clone)]
pub struct StaticRecipients(pub Vec<String>);

#[async_trait]
impl RecipientResolver for StaticRecipients {
    async fn recipients(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Every active user with an email address.
pub struct UserRecipients {
    users: Arc<dyn UserRepository>,
}

impl UserRecipients {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl RecipientResolver for UserRecipients {
    async fn recipients(&self) -> Result<Vec<String>> {
        let users = self
            .users
            .list_users()
            .await
            .map_err(|err| LifecycleError::Recipients(err.to_string()))?;

        Ok(users
            .into_iter()
            .filter(|user| user.is_active && !user.email.trim().is_empty())
            .map(|user| user.email)
            .collect())
    }
}

/// How creation notices reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// Deliver before the create returns; delivery errors fail the create.
    #[default]
    Inline,
    /// Hand off to a background task; delivery errors are only logged.
    Queued,
}

impl FromStr for NotifyMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "queued" => Ok(Self::Queued),
            other => Err(format!("unknown notify mode {other:?}, expected inline or queued")),
        }
    }
}

#[derive(Clone)]
enum Delivery {
    Inline(Arc<dyn NotificationSink>),
    Queued(mpsc::UnboundedSender<Notification>),
}

/// Announces newly created watched entities.
#[derive(Clone)]
pub struct Notifier {
    from: String,
    recipients: Arc<dyn RecipientResolver>,
    delivery: Delivery,
}

impl Notifier {
    /// Creates a notifier. `Queued` spawns the delivery task, so it must be
    /// called from within a Tokio runtime.
    pub fn new(
        mode: NotifyMode,
        from: impl Into<String>,
        recipients: Arc<dyn RecipientResolver>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let delivery = match mode {
            NotifyMode::Inline => Delivery::Inline(sink),
            NotifyMode::Queued => Delivery::Queued(spawn_delivery(sink)),
        };
        Self {
            from: from.into(),
            recipients,
            delivery,
        }
    }

    pub fn mode(&self) -> NotifyMode {
        match self.delivery {
            Delivery::Inline(_) => NotifyMode::Inline,
            Delivery::Queued(_) => NotifyMode::Queued,
        }
    }

    /// Sends the "<Model> Created" notice for `entity`.
    ///
    /// Nothing is sent when there are no recipients.
    pub async fn announce<W: Watched + Sync>(&self, entity: &W) -> Result<()> {
        let recipients = self.recipients.recipients().await?;
        if recipients.is_empty() {
            tracing::debug!(model = W::MODEL, id = entity.id(), "No recipients for notice");
            return Ok(());
        }

        let notice = creation_notice(entity, &self.from, recipients);
        match &self.delivery {
            Delivery::Inline(sink) => sink.send(&notice).await,
            Delivery::Queued(queue) => queue
                .send(notice)
                .map_err(|_| LifecycleError::Delivery("notification queue is closed".to_string())),
        }
    }
}

fn spawn_delivery(sink: Arc<dyn NotificationSink>) -> mpsc::UnboundedSender<Notification> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();

    tokio::spawn(async move {
        tracing::debug!("Notification worker started");
        while let Some(notice) = rx.recv().await {
            if let Err(err) = sink.send(&notice).await {
                tracing::error!(subject = %notice.subject, error = %err, "Notification delivery failed");
            }
        }
        tracing::debug!("Notification worker stopped");
    });

    tx
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::sync::Mutex;

    /// Sink that keeps every notification, or fails every send.
    #[derive(Default)]
    pub struct RecordingSink {
        pub sent: Mutex<Vec<Notification>>,
        pub fail: bool,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn send(&self, notification: &Notification) -> Result<()> {
            if self.fail {
                return Err(LifecycleError::Delivery("smtp unavailable".to_string()));
            }
            self.sent.lock().await.push(notification.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;
    use std::time::Duration;

    use chrono::Utc;
    use texnomart_core::catalog::Category;

    fn category(id: i64, title: &str) -> Category {
        let now = Utc::now();
        Category {
            id,
            title: title.to_string(),
            slug: title.to_lowercase(),
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn recipients() -> Arc<dyn RecipientResolver> {
        Arc::new(StaticRecipients(vec!["ali@example.uz".to_string()]))
    }

    #[test]
    fn test_notify_mode_parses() {
        assert_eq!("inline".parse::<NotifyMode>(), Ok(NotifyMode::Inline));
        assert_eq!(" Queued ".parse::<NotifyMode>(), Ok(NotifyMode::Queued));
        assert!("email".parse::<NotifyMode>().is_err());
    }

    #[tokio::test]
    async fn test_inline_sends_one_notice_per_create() {
        let sink = Arc::new(RecordingSink::default());
        let notifier = Notifier::new(NotifyMode::Inline, "noreply@texnomart.uz", recipients(), sink.clone());

        notifier.announce(&category(1, "Laptops")).await.unwrap();
        notifier.announce(&category(2, "Tablets")).await.unwrap();

        let sent = sink.sent.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "Category Created");
        assert!(sent[0].body.contains("Laptops"));
        assert!(sent[1].body.contains("Tablets"));
        assert_ne!(sent[0].body, sent[1].body);
        assert_eq!(sent[0].from, "noreply@texnomart.uz");
    }

    #[tokio::test]
    async fn test_inline_failure_propagates() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(NotifyMode::Inline, "noreply@texnomart.uz", recipients(), sink);

        let result = notifier.announce(&category(1, "Laptops")).await;
        assert!(matches!(result, Err(LifecycleError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_queued_failure_does_not_propagate() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(NotifyMode::Queued, "noreply@texnomart.uz", recipients(), sink);

        assert_eq!(notifier.mode(), NotifyMode::Queued);
        assert!(notifier.announce(&category(1, "Laptops")).await.is_ok());
    }

    #[tokio::test]
    async fn test_queued_delivers_in_background() {
        let sink = Arc::new(RecordingSink::default());
        let notifier = Notifier::new(NotifyMode::Queued, "noreply@texnomart.uz", recipients(), sink.clone());

        notifier.announce(&category(5, "Cameras")).await.unwrap();

        for _ in 0..50 {
            if !sink.sent.lock().await.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let sent = sink.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "Dear user, Cameras was created.");
    }

    #[tokio::test]
    async fn test_no_recipients_skips_sink() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(
            NotifyMode::Inline,
            "noreply@texnomart.uz",
            Arc::new(StaticRecipients::default()),
            sink,
        );

        assert!(notifier.announce(&category(1, "Laptops")).await.is_ok());
    }
}
