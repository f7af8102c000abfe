//! Commerce catalog adapter (products, categories, CMS pages).

use serde_json::Value;
use std::sync::Arc;

use crate::adapters::metadata::{first_record, first_text, pick};
use crate::adapters::{LookupStep, SourceAdapter};
use crate::backend::{QueryClient, QueryDescriptor};
use crate::content::{ContentMetadata, EntityType};

pub const SOURCE: &str = "magento";
pub const DEFAULT_PRIORITY: i32 = 100;

pub const PRODUCT_BY_URL_KEY: QueryDescriptor = QueryDescriptor::new(
    "GetProductByUrlKey",
    r#"query GetProductByUrlKey($urlKey: String!) {
  products(filter: { url_key: { eq: $urlKey } }) {
    items {
      id name sku url_key stock_status created_at updated_at
      meta_title meta_description
      description { html }
      price_range {
        minimum_price {
          regular_price { value currency }
          final_price { value currency }
        }
      }
      media_gallery { url label position }
      categories { id name url_key }
    }
  }
}"#,
);

pub const CATEGORY_BY_URL_KEY: QueryDescriptor = QueryDescriptor::new(
    "GetCategoryByUrlKey",
    r#"query GetCategoryByUrlKey($urlKey: String!) {
  categories(filters: { url_key: { eq: $urlKey } }) {
    items {
      id name url_key description image meta_title meta_description meta_keywords
      children { id name url_key }
      products {
        items {
          id name sku url_key
          price_range { minimum_price { regular_price { value currency } } }
          media_gallery { url label }
        }
      }
    }
  }
}"#,
);

pub const CMS_PAGE_BY_IDENTIFIER: QueryDescriptor = QueryDescriptor::new(
    "GetCmsPageByIdentifier",
    r#"query GetCmsPageByIdentifier($identifier: String!) {
  cmsPage(identifier: $identifier) {
    title identifier content meta_title meta_description meta_keywords
  }
}"#,
);

fn product_hit(data: &Value) -> Option<&Value> {
    first_record(data.pointer("/products/items")?)
}

fn category_hit(data: &Value) -> Option<&Value> {
    first_record(data.pointer("/categories/items")?)
}

fn cms_page_hit(data: &Value) -> Option<&Value> {
    data.get("cmsPage").filter(|page| page.is_object())
}

/// Product first, then category, then CMS page.
pub fn lookup_steps() -> Vec<LookupStep> {
    vec![
        LookupStep {
            entity_type: EntityType::Product,
            query: PRODUCT_BY_URL_KEY,
            variable: "urlKey",
            extract: product_hit,
        },
        LookupStep {
            entity_type: EntityType::Category,
            query: CATEGORY_BY_URL_KEY,
            variable: "urlKey",
            extract: category_hit,
        },
        LookupStep {
            entity_type: EntityType::CmsPage,
            query: CMS_PAGE_BY_IDENTIFIER,
            variable: "identifier",
            extract: cms_page_hit,
        },
    ]
}

/// Explicit title/meta fields win over generic name/description.
pub fn derive_metadata(record: &Value) -> ContentMetadata {
    ContentMetadata {
        title: first_text(record, &["/title", "/name"]),
        description: first_text(
            record,
            &["/meta_description", "/description/html", "/description"],
        ),
        seo: pick(record, &["meta_title", "meta_description", "meta_keywords"]),
    }
}

pub fn adapter(client: Arc<dyn QueryClient>, priority: i32) -> SourceAdapter {
    SourceAdapter::new(SOURCE, priority, client, lookup_steps(), derive_metadata)
}
