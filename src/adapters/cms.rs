//! Headless CMS adapter (articles, pages).

use serde_json::Value;
use std::sync::Arc;

use crate::adapters::metadata::{first_record, first_text};
use crate::adapters::{LookupStep, SourceAdapter};
use crate::backend::{QueryClient, QueryDescriptor};
use crate::content::{ContentMetadata, EntityType};

pub const SOURCE: &str = "strapi";
pub const DEFAULT_PRIORITY: i32 = 50;

pub const ARTICLE_BY_SLUG: QueryDescriptor = QueryDescriptor::new(
    "GetArticleBySlug",
    r#"query GetArticleBySlug($slug: String!) {
  articles(filters: { slug: { eq: $slug } }, status: PUBLISHED) {
    documentId title description slug publishedAt
    cover { name alternativeText url }
    author { name }
    category { name }
  }
}"#,
);

pub const PAGE_BY_SLUG: QueryDescriptor = QueryDescriptor::new(
    "GetPageBySlug",
    r#"query GetPageBySlug($slug: String!) {
  pages(filters: { slug: { eq: $slug } }) {
    documentId title slug
    seo { metaTitle metaDescription }
    contentSections { __typename }
  }
}"#,
);

fn article_hit(data: &Value) -> Option<&Value> {
    first_record(data.get("articles")?)
}

fn page_hit(data: &Value) -> Option<&Value> {
    first_record(data.get("pages")?)
}

/// Articles first, then pages.
pub fn lookup_steps() -> Vec<LookupStep> {
    vec![
        LookupStep {
            entity_type: EntityType::Article,
            query: ARTICLE_BY_SLUG,
            variable: "slug",
            extract: article_hit,
        },
        LookupStep {
            entity_type: EntityType::Page,
            query: PAGE_BY_SLUG,
            variable: "slug",
            extract: page_hit,
        },
    ]
}

pub fn derive_metadata(record: &Value) -> ContentMetadata {
    ContentMetadata {
        title: first_text(record, &["/title", "/seo/metaTitle"]),
        description: first_text(record, &["/description", "/seo/metaDescription"]),
        seo: record.get("seo").filter(|seo| seo.is_object()).cloned(),
    }
}

pub fn adapter(client: Arc<dyn QueryClient>, priority: i32) -> SourceAdapter {
    SourceAdapter::new(SOURCE, priority, client, lookup_steps(), derive_metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_order() {
        let order: Vec<EntityType> = lookup_steps().iter().map(|s| s.entity_type).collect();
        assert_eq!(order, vec![EntityType::Article, EntityType::Page]);
        assert!(lookup_steps().iter().all(|s| s.variable == "slug"));
    }

    #[test]
    fn test_hit_extraction() {
        assert!(article_hit(&json!({ "articles": [] })).is_none());
        assert_eq!(
            page_hit(&json!({ "pages": [{ "slug": "home" }] })),
            Some(&json!({ "slug": "home" }))
        );
    }

    #[test]
    fn test_page_metadata_from_seo() {
        let record = json!({
            "title": "Home",
            "seo": { "metaTitle": "Welcome", "metaDescription": "Our store" }
        });
        let meta = derive_metadata(&record);
        assert_eq!(meta.title.as_deref(), Some("Home"));
        assert_eq!(meta.description.as_deref(), Some("Our store"));
        assert_eq!(meta.seo.unwrap()["metaTitle"], "Welcome");
    }

    #[test]
    fn test_title_falls_back_to_seo() {
        let record = json!({
            "slug": "home",
            "title": null,
            "seo": { "metaTitle": "Welcome", "metaDescription": "Our store" }
        });
        let meta = derive_metadata(&record);
        assert_eq!(meta.title.as_deref(), Some("Welcome"));

        let record = json!({ "slug": "home", "seo": { "metaTitle": "Welcome" } });
        assert_eq!(derive_metadata(&record).title.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_article_metadata_prefers_description() {
        let record = json!({ "title": "Launch", "description": "We launched", "seo": null });
        let meta = derive_metadata(&record);
        assert_eq!(meta.description.as_deref(), Some("We launched"));
        assert!(meta.seo.is_none());
    }
}
