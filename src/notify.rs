use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Delivery channel for a one-time code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Email,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Sms => write!(f, "sms"),
            Channel::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("provider rejected the message: {0}")]
    Provider(String),
}

/// Outbound sender for one-time codes, injected through `AppState` so the
/// handlers stay testable without a real SMS/email provider.
#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug {
    async fn send_code(&self, channel: Channel, destination: &str, code: &str)
        -> Result<(), SendError>;
}

/// Stand-in sender used until a real provider is configured. Reports success
/// without transmitting anything.
#[derive(Clone, Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_code(
        &self,
        channel: Channel,
        destination: &str,
        _code: &str,
    ) -> Result<(), SendError> {
        debug!("Skipping {} code delivery to {}", channel, destination);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_notifier_always_acknowledges() {
        let notifier = NoopNotifier;
        let sent = notifier.send_code(Channel::Sms, "5551234", "123456").await;
        assert!(sent.is_ok());
        let sent = notifier.send_code(Channel::Email, "a@b.com", "654321").await;
        assert!(sent.is_ok());
    }

    #[test]
    fn channel_display_names() {
        assert_eq!(Channel::Sms.to_string(), "sms");
        assert_eq!(Channel::Email.to_string(), "email");
    }
}
