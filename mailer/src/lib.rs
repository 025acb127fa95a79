use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use common::{
    env_config::SmtpConfig,
    error::{AppError, Res},
};

/// Transactional mail sender. Built once at startup from `SmtpConfig` and
/// shared across workers; the transport pools its SMTP connections.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> Res<Self> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Mailer {
            transport: builder.build(),
            from_address: config.from_address.clone(),
        })
    }

    /// Sends the post-registration verification link.
    pub async fn send_verification_email(
        &self,
        to: &str,
        username: &str,
        verify_url: &str,
    ) -> Res<()> {
        let body = verification_body(username, verify_url);
        self.send("Verify your email for Tradez", to, &body).await
    }

    /// Sends the password-reset link.
    pub async fn send_password_reset_email(
        &self,
        to: &str,
        username: &str,
        reset_url: &str,
    ) -> Res<()> {
        let body = reset_body(username, reset_url);
        self.send("Reset your password for Tradez", to, &body).await
    }

    async fn send(&self, subject: &str, to: &str, body: &str) -> Res<()> {
        let message = build_message(&self.from_address, to, subject, body)?;
        self.transport.send(message).await?;
        log::debug!("Sent \"{}\" to {}", subject, to);
        Ok(())
    }
}

fn build_message(from: &str, to: &str, subject: &str, body: &str) -> Res<Message> {
    Message::builder()
        .from(
            from.parse::<Mailbox>()
                .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?,
        )
        .to(to
            .parse::<Mailbox>()
            .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {}", e)))?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(AppError::from)
}

fn verification_body(username: &str, verify_url: &str) -> String {
    format!(
        "Hi {},\n\nPlease verify your email by clicking the link below:\n{}\n\nThank you!",
        username, verify_url
    )
}

fn reset_body(username: &str, reset_url: &str) -> String {
    format!(
        "Hi {},\n\nPlease reset your password by clicking the link below:\n{}\n\nThank you!",
        username, reset_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_plain_text_message() {
        let message = build_message(
            "no-reply@example.com",
            "newuser@example.com",
            "Verify your email for Tradez",
            "hello",
        );
        assert!(message.is_ok());
    }

    #[test]
    fn rejects_malformed_recipient() {
        let message = build_message("no-reply@example.com", "not-an-address", "subject", "body");
        assert!(matches!(message, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn verification_body_carries_link_and_name() {
        let body = verification_body("newuser", "http://localhost:8080/api/auth/verify-email/a/b/");
        assert!(body.starts_with("Hi newuser,"));
        assert!(body.contains("http://localhost:8080/api/auth/verify-email/a/b/"));
    }

    #[test]
    fn reset_body_carries_link() {
        let body = reset_body("newuser", "http://localhost:5173/reset-password/a/b");
        assert!(body.contains("reset your password"));
        assert!(body.contains("http://localhost:5173/reset-password/a/b"));
    }
}
