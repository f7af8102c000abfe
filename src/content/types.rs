//! Envelope, entity and context types shared by every subsystem.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Kind of entity a slug resolved to.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Product,
    Category,
    CmsPage,
    Article,
    Page,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Product => "product",
            EntityType::Category => "category",
            EntityType::CmsPage => "cms_page",
            EntityType::Article => "article",
            EntityType::Page => "page",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of the backend that owns a piece of content (e.g. "magento").
///
/// Deliberately not an enum: each adapter brings its own identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Display hints derived from the raw backend record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Value>,
}

impl ContentMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.seo.is_none()
    }
}

/// Normalized result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEnvelope {
    /// Entity type declared by the lookup that matched.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Name of the adapter that produced the envelope.
    pub source: SourceId,
    /// Raw record as returned by the backend.
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContentMetadata>,
}

impl ContentEnvelope {
    /// Build an envelope for a backend hit. Empty metadata is dropped.
    pub fn new(
        entity_type: EntityType,
        source: SourceId,
        data: Value,
        metadata: ContentMetadata,
    ) -> Self {
        Self {
            entity_type,
            source,
            data,
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }
}

/// Request-scoped information carried alongside a slug.
///
/// Informational only: nothing here influences which adapter wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveContext {
    pub full_path: Option<String>,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: Option<u64>,
}

impl ResolveContext {
    /// Context for a slug with no request information attached.
    pub fn for_slug(slug: &str) -> Self {
        Self::default().complete(slug)
    }

    /// Fill in the path and timestamp when the caller did not supply them.
    pub fn complete(mut self, slug: &str) -> Self {
        if self.full_path.is_none() {
            self.full_path = Some(format!("/{}", slug));
        }
        if self.timestamp.is_none() {
            self.timestamp = Some(now_millis());
        }
        self
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = ContentEnvelope::new(
            EntityType::CmsPage,
            SourceId::from("magento"),
            json!({ "identifier": "about-us" }),
            ContentMetadata {
                title: Some("About us".into()),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "cms_page");
        assert_eq!(value["source"], "magento");
        assert_eq!(value["metadata"]["title"], "About us");
        assert!(value["metadata"].get("description").is_none());
    }

    #[test]
    fn test_empty_metadata_dropped() {
        let envelope = ContentEnvelope::new(
            EntityType::Article,
            SourceId::from("strapi"),
            json!({}),
            ContentMetadata::default(),
        );
        assert!(envelope.metadata.is_none());
    }

    #[test]
    fn test_context_defaults() {
        let ctx = ResolveContext::for_slug("shoes/running");
        assert_eq!(ctx.full_path.as_deref(), Some("/shoes/running"));
        assert!(ctx.timestamp.is_some());

        let supplied = ResolveContext {
            full_path: Some("/en/shoes".into()),
            timestamp: Some(42),
            ..Default::default()
        }
        .complete("shoes");
        assert_eq!(supplied.full_path.as_deref(), Some("/en/shoes"));
        assert_eq!(supplied.timestamp, Some(42));
    }

    #[test]
    fn test_context_accepts_camel_case() {
        let ctx: ResolveContext =
            serde_json::from_value(json!({ "fullPath": "/x", "userAgent": "curl" })).unwrap();
        assert_eq!(ctx.full_path.as_deref(), Some("/x"));
        assert_eq!(ctx.user_agent.as_deref(), Some("curl"));
        assert!(ctx.locale.is_none());
    }
}
