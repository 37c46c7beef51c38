//! Email channel: renders advice as an email body and sends it through an
//! [`EmailTransport`].
//!
//! Delivery is best effort. Contact info is read at send time, a missing
//! address is a normal skip, and transport failures are logged and dropped.

use crate::catalog::bullet_list;
use crate::config::EmailConfig;
use crate::contact::UserContact;
use crate::error::{CheckinError, Result};
use crate::scheduler::ScheduledAdvice;
use crate::store::KeyValueStore;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Outbound email provider.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    /// `false` when this transport never delivers anything.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Deliver one advice email.
    async fn send_advice_email(&self, to_email: &str, to_name: &str, body: &str) -> Result<()>;
}

/// EmailJS REST transport.
pub struct EmailJsTransport {
    client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    access_token: Option<String>,
}

impl EmailJsTransport {
    /// # Errors
    ///
    /// Returns [`CheckinError::Email`] if the HTTP client cannot be built.
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CheckinError::Email(format!("cannot build http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            access_token: config
                .access_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
        })
    }
}

#[async_trait]
impl EmailTransport for EmailJsTransport {
    fn id(&self) -> &'static str {
        "emailjs"
    }

    async fn send_advice_email(&self, to_email: &str, to_name: &str, body: &str) -> Result<()> {
        let mut payload = json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.public_key,
            "template_params": {
                "user_name": to_name,
                "user_email": to_email,
                "user_advice": body,
            },
        });
        if let Some(token) = &self.access_token {
            payload["accessToken"] = json!(token);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CheckinError::Email(format!("emailjs request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CheckinError::Email(format!(
                "emailjs send failed ({status}): {text}"
            )));
        }
        Ok(())
    }
}

/// Transport used when email is disabled or not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEmailTransport;

#[async_trait]
impl EmailTransport for NoopEmailTransport {
    fn id(&self) -> &'static str {
        "noop"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn send_advice_email(&self, _to_email: &str, _to_name: &str, _body: &str) -> Result<()> {
        Err(CheckinError::Email("email disabled".to_owned()))
    }
}

/// Pick the transport for `config`: EmailJS when fully configured, no-op otherwise.
///
/// # Errors
///
/// Returns an error if the EmailJS client cannot be built.
pub fn transport_from_config(config: &EmailConfig) -> Result<Arc<dyn EmailTransport>> {
    if config.is_configured() {
        Ok(Arc::new(EmailJsTransport::new(config)?))
    } else {
        if config.enabled {
            warn!("email enabled but service_id, template_id or public_key is missing");
        }
        Ok(Arc::new(NoopEmailTransport))
    }
}

/// Plain-text email body for one advice record.
pub fn format_advice_email(advice: &ScheduledAdvice) -> String {
    let mut sections = vec![
        "Hi there,".to_owned(),
        "We hope you're doing well. Here's a gentle piece of advice for your mental well-being today:"
            .to_owned(),
        advice.personal_message.clone(),
        format!("**{}**", advice.tip.title),
        advice.tip.advice.clone(),
        format!("**What you can do:**\n{}", bullet_list(&advice.tip.actionable)),
    ];
    if let Some(affirmation) = &advice.affirmation {
        sections.push(affirmation.clone());
    }
    if let Some(prompt) = &advice.check_in_prompt {
        sections.push(format!("Reflection: {prompt}"));
    }
    sections.push("Remember, small steps build strong habits.".to_owned());
    sections.push("Best regards,\nThe Companion AI Team".to_owned());
    sections.push(
        "Note: You are receiving these wellness reminders because you have notifications \
         enabled on our website. To stop receiving them, simply turn off notifications in \
         your account settings."
            .to_owned(),
    );
    sections.join("\n\n")
}

/// Sends advice emails to the stored contact.
#[derive(Clone)]
pub struct EmailDispatcher {
    transport: Arc<dyn EmailTransport>,
    store: Arc<dyn KeyValueStore>,
    fallback_name: String,
}

impl EmailDispatcher {
    pub fn new(
        transport: Arc<dyn EmailTransport>,
        store: Arc<dyn KeyValueStore>,
        fallback_name: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            store,
            fallback_name: fallback_name.into(),
        }
    }

    /// Send `advice` to the stored contact.
    ///
    /// Returns `Ok(false)` when email is disabled or no address is on file.
    ///
    /// # Errors
    ///
    /// Returns the transport error when delivery fails.
    pub async fn deliver(&self, advice: &ScheduledAdvice) -> Result<bool> {
        if !self.transport.is_enabled() {
            debug!("email disabled, skipping advice email for {}", advice.id);
            return Ok(false);
        }
        let contact = UserContact::load(self.store.as_ref());
        let Some(email) = contact.email() else {
            info!("no email on file, skipping advice email for {}", advice.id);
            return Ok(false);
        };
        let name = contact.name().unwrap_or(self.fallback_name.as_str());
        let body = format_advice_email(advice);

        self.transport.send_advice_email(email, name, &body).await?;
        info!(
            "advice {} emailed to {email} via {}",
            advice.id,
            self.transport.id()
        );
        Ok(true)
    }

    /// Fire-and-forget delivery on the current tokio runtime.
    ///
    /// Returns `None` without sending when called outside a runtime.
    pub fn dispatch(&self, advice: ScheduledAdvice) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, skipping advice email for {}", advice.id);
            return None;
        };
        let dispatcher = self.clone();
        Some(runtime.spawn(async move {
            if let Err(e) = dispatcher.deliver(&advice).await {
                warn!("failed to send advice email for {}: {e}", advice.id);
            }
        }))
    }
}
