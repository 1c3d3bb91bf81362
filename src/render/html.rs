//! Server-rendered HTML page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::{context, Environment};
use serde::Serialize;

use super::ResponseRenderer;
use crate::config::{FIELD_CITY, FIELD_EMAIL, FIELD_HONEYPOT};
use crate::error_handling::CheckError;
use crate::service::AqiReading;

// The .html name turns on minijinja's HTML auto-escaping
const TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("index.html");

#[derive(Serialize)]
struct FieldNames {
    city: &'static str,
    email: &'static str,
    honeypot: &'static str,
}

const FIELDS: FieldNames = FieldNames {
    city: FIELD_CITY,
    email: FIELD_EMAIL,
    honeypot: FIELD_HONEYPOT,
};

/// What the template shows for a reading.
#[derive(Serialize)]
struct ReadingView<'a> {
    city: &'a str,
    aqi: String,
    label: &'static str,
    severity: &'static str,
    emoji: &'static str,
}

impl<'a> From<&'a AqiReading> for ReadingView<'a> {
    fn from(reading: &'a AqiReading) -> Self {
        Self {
            city: &reading.city,
            aqi: reading
                .aqi
                .map(|aqi| aqi.to_string())
                .unwrap_or_else(|| "-".to_string()),
            label: reading.category.label(),
            severity: reading.category.severity_class(),
            emoji: reading.category.emoji(),
        }
    }
}

/// Renders the form page, with a result or an inline error below it.
pub struct HtmlRenderer {
    env: Environment<'static>,
    require_email: bool,
}

impl HtmlRenderer {
    /// # Errors
    ///
    /// Returns a `minijinja::Error` if the embedded template does not parse.
    pub fn new(require_email: bool) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env, require_email })
    }

    fn page(&self, status: StatusCode, ctx: minijinja::Value) -> Response {
        let rendered = self
            .env
            .get_template(TEMPLATE_NAME)
            .and_then(|template| template.render(ctx));
        match rendered {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                log::error!("Failed to render {TEMPLATE_NAME}: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

impl ResponseRenderer for HtmlRenderer {
    fn index(&self) -> Response {
        self.page(
            StatusCode::OK,
            context! {
                fields => FIELDS,
                require_email => self.require_email,
                city => "",
            },
        )
    }

    fn success(&self, reading: &AqiReading, client_ip: &str) -> Response {
        self.page(
            StatusCode::OK,
            context! {
                fields => FIELDS,
                require_email => self.require_email,
                city => &reading.city,
                reading => ReadingView::from(reading),
                client_ip => client_ip,
            },
        )
    }

    fn error(&self, err: &CheckError, _client_ip: &str) -> Response {
        let city = match err {
            CheckError::CityNotFound { city, .. } => city.as_str(),
            _ => "",
        };
        self.page(
            err.status_code(),
            context! {
                fields => FIELDS,
                require_email => self.require_email,
                city => city,
                error => err.to_string(),
            },
        )
    }
}
