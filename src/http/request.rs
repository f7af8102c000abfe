//! Resolve request parsing.
//!
//! # Responsibilities
//! - Accept a slug from the query string (GET) or a JSON body (POST)
//! - Build the request context (path, user agent, locale)
//! - Reject missing or blank slugs before touching the resolver

use axum::http::{header::USER_AGENT, HeaderMap};
use serde::Deserialize;

use crate::content::ResolveContext;
use crate::http::response::ApiError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// `GET /api/content/resolve?slug=...&locale=...`
#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    pub slug: Option<String>,
    pub locale: Option<String>,
}

/// `POST /api/content/resolve` body.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveBody {
    pub slug: Option<String>,
    #[serde(default)]
    pub context: Option<ResolveContext>,
}

/// The slug exactly as supplied, unless it is missing or blank.
pub fn require_slug(slug: Option<String>) -> Result<String, ApiError> {
    match slug {
        Some(slug) if !slug.trim().is_empty() => Ok(slug),
        _ => Err(ApiError::MissingSlug),
    }
}

pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

impl ResolveQuery {
    pub fn into_parts(self, headers: &HeaderMap) -> Result<(String, ResolveContext), ApiError> {
        let slug = require_slug(self.slug)?;
        let context = ResolveContext {
            user_agent: user_agent(headers),
            locale: self.locale,
            ..Default::default()
        };
        Ok((slug, context))
    }
}

impl ResolveBody {
    pub fn into_parts(self, headers: &HeaderMap) -> Result<(String, ResolveContext), ApiError> {
        let slug = require_slug(self.slug)?;
        let mut context = self.context.unwrap_or_default();
        if context.user_agent.is_none() {
            context.user_agent = user_agent(headers);
        }
        Ok((slug, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_require_slug() {
        assert_eq!(require_slug(Some("Widget-1".into())).unwrap(), "Widget-1");
        assert!(matches!(require_slug(None), Err(ApiError::MissingSlug)));
        assert!(matches!(require_slug(Some("  ".into())), Err(ApiError::MissingSlug)));
    }

    #[test]
    fn test_body_context_keeps_supplied_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("header-agent"));

        let body: ResolveBody = serde_json::from_str(
            r#"{ "slug": "about", "context": { "userAgent": "body-agent", "locale": "de" } }"#,
        )
        .unwrap();
        let (slug, context) = body.into_parts(&headers).unwrap();
        assert_eq!(slug, "about");
        assert_eq!(context.user_agent.as_deref(), Some("body-agent"));
        assert_eq!(context.locale.as_deref(), Some("de"));

        let body: ResolveBody = serde_json::from_str(r#"{ "slug": "about" }"#).unwrap();
        let (_, context) = body.into_parts(&headers).unwrap();
        assert_eq!(context.user_agent.as_deref(), Some("header-agent"));
    }

    #[test]
    fn test_request_id_fallback() {
        assert_eq!(request_id(&HeaderMap::new()), "unknown");
    }
}
