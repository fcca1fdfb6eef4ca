//! HTTP API for the contact mail endpoint
//!
//! Endpoints:
//! - POST /enviar-mail - Sanitise a contact submission and hand it to the relay
//! - GET /health - Health check
//!
//! Any other method on /enviar-mail gets 405 "Acceso denegado".
//!
//! Mail goes out through `SmtpRelay`; `LogRelay` is the dry-run stand-in.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use lazy_static::lazy_static;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::types::RelayError;

lazy_static! {
    static ref RE_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

pub const MSG_SENT: &str = "¡Consulta enviada exitosamente!";
pub const MSG_DENIED: &str = "Acceso denegado";

/// Raw contact submission as posted by the page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub espacio: String,
    pub proyecto: String,
}

impl ContactSubmission {
    /// Strip markup from free text, keep only address characters in the email
    pub fn sanitized(&self) -> Self {
        Self {
            nombre: strip_tags(&self.nombre),
            email: sanitize_email(&self.email),
            telefono: strip_tags(&self.telefono),
            espacio: strip_tags(&self.espacio),
            proyecto: strip_tags(&self.proyecto),
        }
    }
}

pub fn strip_tags(input: &str) -> String {
    RE_TAG.replace_all(input, "").trim().to_string()
}

pub fn sanitize_email(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Outgoing mail built from a sanitised submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub subject: String,
    pub reply_to: String,
    pub reply_name: String,
    pub body: String,
    /// sha256 of the sanitised fields, hex
    pub fingerprint: String,
}

impl MailMessage {
    pub fn compose(raw: &ContactSubmission) -> Self {
        let s = raw.sanitized();
        let subject = format!("Consulta Web: {} ({})", s.nombre, s.espacio);
        let body = format!(
            "<h3>Nueva consulta desde la web</h3>\
             <p><strong>Nombre:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Teléfono:</strong> {}</p>\
             <p><strong>Espacio:</strong> {}</p>\
             <p><strong>Proyecto:</strong><br>{}</p>",
            escape_html(&s.nombre),
            escape_html(&s.email),
            escape_html(&s.telefono),
            escape_html(&s.espacio),
            escape_html(&s.proyecto).replace('\n', "<br>"),
        );

        let mut hasher = Sha256::new();
        for value in [&s.nombre, &s.email, &s.telefono, &s.espacio, &s.proyecto] {
            hasher.update(value.as_bytes());
            hasher.update([0u8]);
        }
        let fingerprint: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        Self {
            subject,
            reply_to: s.email,
            reply_name: s.nombre,
            body,
            fingerprint,
        }
    }
}

/// Delivers composed mail
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn deliver(&self, message: &MailMessage) -> Result<(), RelayError>;
}

/// Authenticated SMTP relay; the mailbox is both sender and recipient,
/// the visitor goes in Reply-To
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    endpoint: String,
}

impl SmtpRelay {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let endpoint = format!("{}:{}", config.host, config.port);
        if config.username.is_empty() || config.password.is_empty() {
            return Err(RelayError::Auth(format!("{} (no account configured)", endpoint)));
        }

        let mailbox = if config.mailbox.is_empty() {
            &config.username
        } else {
            &config.mailbox
        };
        let address: Address = mailbox
            .parse()
            .map_err(|e| RelayError::Address(format!("{}: {}", mailbox, e)))?;
        let from = Mailbox::new(Some(config.sender_name.clone()), address.clone());
        let to = Mailbox::new(None, address);

        let builder = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| RelayError::Refused(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_millis(config.timeout_ms)))
            .build();

        Ok(Self {
            transport,
            from,
            to,
            endpoint,
        })
    }

    fn build(&self, message: &MailMessage) -> Result<Message, RelayError> {
        let reply_address: Address = message
            .reply_to
            .parse()
            .map_err(|e| RelayError::Address(format!("{}: {}", message.reply_to, e)))?;
        let reply_name = (!message.reply_name.is_empty()).then(|| message.reply_name.clone());
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .reply_to(Mailbox::new(reply_name, reply_address))
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.body.clone())
            .map_err(|e| RelayError::Address(e.to_string()))
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn deliver(&self, message: &MailMessage) -> Result<(), RelayError> {
        let email = self.build(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| smtp_error(&self.endpoint, e))?;
        info!(
            relay = %self.endpoint,
            fingerprint = %message.fingerprint,
            "contact mail relayed"
        );
        Ok(())
    }
}

/// 53x replies are authentication failures, anything else a refusal
fn smtp_error(endpoint: &str, error: lettre::transport::smtp::Error) -> RelayError {
    match error.status() {
        Some(code) if code.to_string().starts_with("53") => {
            RelayError::Auth(format!("{} ({})", endpoint, code))
        }
        _ => RelayError::Refused(error.to_string()),
    }
}

/// Dry-run relay: logs what would be sent and accepts everything
#[derive(Debug, Clone)]
pub struct LogRelay {
    endpoint: String,
    sender_name: String,
    mailbox: String,
}

impl LogRelay {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            endpoint: format!("{}:{}", config.host, config.port),
            sender_name: config.sender_name.clone(),
            mailbox: config.mailbox.clone(),
        }
    }
}

#[async_trait]
impl MailRelay for LogRelay {
    async fn deliver(&self, message: &MailMessage) -> Result<(), RelayError> {
        info!(
            relay = %self.endpoint,
            from = %self.sender_name,
            to = %self.mailbox,
            reply_to = %message.reply_to,
            subject = %message.subject,
            fingerprint = %message.fingerprint,
            "dry run, contact mail not sent"
        );
        Ok(())
    }
}

/// JSON reply shared by every outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailReply {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl MailReply {
    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            fingerprint: None,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

type AppState = Arc<dyn MailRelay>;

/// Create the API router
pub fn create_router(relay: Arc<dyn MailRelay>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/enviar-mail", post(send_mail).fallback(method_not_allowed))
        .with_state(relay)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn send_mail(
    State(relay): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> (StatusCode, Json<MailReply>) {
    let message = MailMessage::compose(&submission);
    match relay.deliver(&message).await {
        Ok(()) => {
            info!(fingerprint = %message.fingerprint, "contact mail accepted");
            (
                StatusCode::OK,
                Json(MailReply {
                    status: "success".to_string(),
                    message: MSG_SENT.to_string(),
                    fingerprint: Some(message.fingerprint),
                }),
            )
        }
        Err(e) => {
            warn!(error = %e, fingerprint = %message.fingerprint, "contact mail failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MailReply::error(format!("Error técnico: {}", e))),
            )
        }
    }
}

async fn method_not_allowed() -> (StatusCode, Json<MailReply>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(MailReply::error(MSG_DENIED)))
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    relay: Arc<dyn MailRelay>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(relay);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "mail endpoint listening");
    info!("  POST /enviar-mail - Contact submission");
    info!("  GET  /health      - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
