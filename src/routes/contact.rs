//! Contact form endpoint for the portfolio page.
//!
//! Only checks that every field was filled in; delivery is out of scope.

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::DashboardError;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(submit))
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    // ---
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    message: String,
}

impl ContactForm {
    /// Names of fields left blank, in form order.
    fn missing_fields(&self) -> Vec<&'static str> {
        // ---
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

async fn submit(Json(form): Json<ContactForm>) -> Result<Json<ContactResponse>, DashboardError> {
    // ---
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(DashboardError::Validation(missing));
    }

    info!("POST /contact - message received from {}", form.email.trim());

    Ok(Json(ContactResponse {
        message: format!(
            "Thank you, {}! Your message has been sent. I will get back to you soon.",
            form.name.trim()
        ),
    }))
}
