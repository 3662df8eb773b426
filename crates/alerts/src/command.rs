//! Desktop notifications via an external program.

use crate::notifier::Notifier;
use async_trait::async_trait;
use monitor_core::MonitorError;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs `program [args..] <title> <message>` for each alert.
///
/// Defaults to `notify-send`, which shows a desktop popup on most Linux
/// desktops. Any program that accepts title and body as trailing arguments
/// works.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for CommandNotifier {
    fn default() -> Self {
        Self::new("notify-send")
    }
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Extra arguments placed before title and message.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError> {
        debug!(program = %self.program, "Launching desktop notification");

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(title).arg(message).kill_on_drop(true);

        let status = tokio::time::timeout(self.timeout, command.status())
            .await
            .map_err(|_| {
                MonitorError::NotifyFailed(format!("{} timed out", self.program))
            })?
            .map_err(|e| MonitorError::NotifyFailed(format!("{}: {}", self.program, e)))?;

        if !status.success() {
            return Err(MonitorError::NotifyFailed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "desktop"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        let notifier = CommandNotifier::new("true");
        assert!(notifier.notify("title", "message").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_command() {
        let notifier = CommandNotifier::new("false");
        let err = notifier.notify("title", "message").await.unwrap_err();
        assert!(matches!(err, MonitorError::NotifyFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let notifier = CommandNotifier::new("definitely-not-a-real-notifier-binary");
        assert!(notifier.notify("title", "message").await.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        // Title and message become $0 and $1 of the inline script.
        let notifier = CommandNotifier::new("sh")
            .with_args(vec!["-c".to_string(), "sleep 5".to_string()])
            .with_timeout(Duration::from_millis(50));
        let err = notifier.notify("title", "message").await.unwrap_err();
        assert_eq!(err, MonitorError::NotifyFailed("sh timed out".to_string()));
    }
}
