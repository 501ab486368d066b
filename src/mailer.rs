use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

/// Outbound mail. Handlers only see this trait; tests substitute a fake.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Message) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .context("smtp relay config")?;
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: Message) -> anyhow::Result<()> {
        self.transport.send(message).await.context("smtp send")?;
        Ok(())
    }
}

/// Builds the contact-form notification addressed to the configured
/// recipient, with reply-to pointing back at the submitter.
pub fn contact_message(
    config: &SmtpConfig,
    name: &str,
    email: &str,
    subject: Option<&str>,
    body: &str,
) -> anyhow::Result<Message> {
    let from: Mailbox = config.smtp_from_mailbox()?;
    let to: Mailbox = config
        .contact_recipient
        .parse()
        .context("parse CONTACT_RECIPIENT")?;
    let reply_to = Mailbox::new(
        Some(name.to_string()),
        email.parse::<Address>().context("parse submitter email")?,
    );

    let message = Message::builder()
        .from(from)
        .reply_to(reply_to)
        .to(to)
        .subject(subject.unwrap_or("New contact form message"))
        .header(ContentType::TEXT_PLAIN)
        .body(format!("From: {name} <{email}>\n\n{body}"))
        .context("build contact message")?;
    Ok(message)
}

impl SmtpConfig {
    fn smtp_from_mailbox(&self) -> anyhow::Result<Mailbox> {
        self.from.parse().context("parse SMTP_FROM")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".into(),
            username: String::new(),
            password: String::new(),
            from: "Academy Portal <no-reply@academy.local>".into(),
            contact_recipient: "admissions@academy.local".into(),
        }
    }

    #[test]
    fn builds_message_with_reply_to() {
        let msg = contact_message(
            &config(),
            "Ada Lovelace",
            "ada@example.com",
            Some("Question about courses"),
            "Do you offer evening classes?",
        )
        .expect("message builds");
        let headers = format!("{:?}", msg.headers());
        assert!(headers.contains("ada@example.com"));
        assert!(headers.contains("admissions@academy.local"));
        assert!(headers.contains("Question about courses"));
    }

    #[test]
    fn default_subject_when_none_given() {
        let msg = contact_message(&config(), "Bob", "bob@example.com", None, "hello")
            .expect("message builds");
        assert!(format!("{:?}", msg.headers()).contains("New contact form message"));
    }

    #[test]
    fn rejects_unparseable_submitter_address() {
        assert!(contact_message(&config(), "Eve", "not an address", None, "hi").is_err());
    }
}
