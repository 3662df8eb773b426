//! Telegram delivery for price alerts.

use crate::notifier::Notifier;
use async_trait::async_trait;
use monitor_core::MonitorError;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html;
use tracing::info;

/// Sends alerts to a single Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Create a notifier for `chat_id` using the given bot token.
    pub fn new(token: &str, chat_id: &str) -> Result<Self, MonitorError> {
        let id = chat_id.trim().parse::<i64>().map_err(|_| {
            MonitorError::InvalidConfig(format!("invalid Telegram chat id: {}", chat_id))
        })?;

        Ok(Self {
            bot: Bot::new(token),
            chat_id: ChatId(id),
        })
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }
}

/// Format an alert as Telegram HTML with a UTC timestamp.
pub fn format_alert_message(title: &str, message: &str) -> String {
    let now = chrono::Utc::now();
    format!(
        "🚨 <b>{}</b>\n\n{}\n\n⏰ {}",
        html::escape(title),
        html::escape(message),
        now.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError> {
        let text = format_alert_message(title, message);
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| MonitorError::NotifyFailed(format!("Telegram API error: {}", e)))?;

        info!(chat_id = %self.chat_id, "Telegram alert sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_parses_chat_id() {
        let notifier = TelegramNotifier::new("123:abc", "-10042").unwrap();
        assert_eq!(notifier.chat_id(), ChatId(-100_42));
    }

    #[test]
    fn test_new_rejects_bad_chat_id() {
        assert!(matches!(
            TelegramNotifier::new("123:abc", "not-a-number"),
            Err(MonitorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_format_alert_message_escapes_html() {
        let msg = format_alert_message("BTC <alert>", "Price: $66000.00 ≥ $65900.00");
        assert!(msg.contains("<b>BTC &lt;alert&gt;</b>"));
        assert!(msg.contains("Price: $66000.00 ≥ $65900.00"));
        assert!(msg.contains("UTC"));
    }
}
