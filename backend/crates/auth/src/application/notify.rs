//! Account mails
//!
//! Links point at the frontend (`APP_URL`), which calls back into the API
//! with the same query string. Delivery runs on a detached task; a failure
//! is logged and never reaches the HTTP caller.

use std::sync::Arc;

use platform::mail::{MailSender, OutgoingMail};
use url::Url;

use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

fn link(app_url: &str, path: &str, email: &Email, token: &str) -> AuthResult<Url> {
    let base = format!("{}{}", app_url.trim_end_matches('/'), path);
    Url::parse_with_params(&base, &[("email", email.as_str()), ("token", token)])
        .map_err(|e| AuthError::Internal(format!("Invalid APP_URL: {e}")))
}

pub fn verification_mail(app_url: &str, email: &Email, token: &str) -> AuthResult<OutgoingMail> {
    let url = link(app_url, "/verify", email, token)?;
    Ok(OutgoingMail {
        to: email.to_string(),
        subject: "Verify your email".to_string(),
        html: format!(
            "<p>Welcome! Please confirm your email address.</p>\
             <p><a href=\"{url}\">Verify my email</a></p>"
        ),
    })
}

pub fn password_reset_mail(app_url: &str, email: &Email, token: &str) -> AuthResult<OutgoingMail> {
    let url = link(app_url, "/change-password", email, token)?;
    Ok(OutgoingMail {
        to: email.to_string(),
        subject: "Reset your password".to_string(),
        html: format!(
            "<p>We received a request to reset your password. The link is valid for 5 minutes.</p>\
             <p><a href=\"{url}\">Choose a new password</a></p>\
             <p>If you did not ask for this, ignore this mail.</p>"
        ),
    })
}

/// Fire-and-forget delivery
pub fn dispatch<M>(mailer: Arc<M>, mail: OutgoingMail)
where
    M: MailSender + Sync + 'static,
{
    tokio::spawn(async move {
        let to = mail.to.clone();
        if let Err(e) = mailer.send(mail).await {
            tracing::warn!(to = %to, error = %e, "Failed to deliver mail");
        }
    });
}
