use async_trait::async_trait;

use super::Mailer;
use crate::config::SmtpConfig;

pub struct LogMailer {
    smtp: SmtpConfig,
    from: String,
}

impl LogMailer {
    pub fn new(smtp: SmtpConfig, from: String) -> Self {
        Self { smtp, from }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!to.trim().is_empty(), "missing mail recipient");

        tracing::info!(
            smtp_host = %self.smtp.host,
            smtp_port = self.smtp.port,
            smtp_user = %self.smtp.user,
            from = %self.from,
            to = %to,
            subject = %subject,
            "simulated mail delivery"
        );
        tracing::debug!(body = %body, "simulated mail body");
        Ok(())
    }
}
