//! Search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use super::home::ProductCardView;
use crate::catalog;
use crate::error::add_breadcrumb;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search results fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub query: String,
    pub products: Vec<ProductCardView>,
}

impl SearchResultsTemplate {
    /// Results for `query`. A blank query yields an empty fragment.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        let query = query.trim();
        Self {
            query: query.to_string(),
            products: catalog::search(query)
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
        }
    }
}

/// Search the demo catalog.
#[instrument(skip(params), fields(query = %params.q))]
pub async fn search(Query(params): Query<SearchQuery>) -> impl IntoResponse {
    let results = SearchResultsTemplate::for_query(&params.q);

    if !results.query.is_empty() {
        add_breadcrumb("search", "Catalog search", &[("query", &results.query)]);
        tracing::debug!(matches = results.products.len(), "Search completed");
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_renders_empty_fragment() {
        let html = SearchResultsTemplate::for_query("  ").render().unwrap();
        assert!(html.contains("id=\"search-results\""));
        assert!(!html.contains("Searching for"));
    }

    #[test]
    fn test_query_echoes_and_lists_matches() {
        let results = SearchResultsTemplate::for_query(" mug ");
        assert_eq!(results.query, "mug");
        assert_eq!(results.products.len(), 1);

        let html = results.render().unwrap();
        assert!(html.contains("Searching for: mug"));
        assert!(html.contains("Ceramic Coffee Mug"));
    }

    #[test]
    fn test_query_is_escaped() {
        let html = SearchResultsTemplate::for_query("<script>")
            .render()
            .unwrap();
        assert!(html.contains("&#60;script&#62;") || html.contains("&lt;script&gt;"));
        assert!(html.contains("No products found."));
    }
}
