//! Link collector for book listing pages.
//!
//! Walks the whole document tree once and gathers the hrefs of anchors that
//! point at a book detail page, in document order.

use scraper::Html;
use tracing::debug;

use super::config::{BookListIndicators, ParsingConfig};
use super::context::ParseContext;
use super::error::ParsingResult;
use super::ContextualParser;

/// Parser for extracting book detail-page links from listing pages.
#[derive(Debug, Clone)]
pub struct BookListParser {
    indicators: BookListIndicators,
}

impl BookListParser {
    /// Create a new list parser with the default Goodreads indicators.
    pub fn new() -> Self {
        Self::with_config(&ParsingConfig::default().book_list_indicators)
    }

    /// Create a list parser with custom indicators.
    pub fn with_config(indicators: &BookListIndicators) -> Self {
        Self {
            indicators: indicators.clone(),
        }
    }

    /// Collect matching links and resolve each against the context's base URL.
    pub fn collect_resolved(
        &self,
        html: &Html,
        context: &ParseContext,
    ) -> ParsingResult<Vec<String>> {
        let links = self.parse_with_context(html, context)?;
        links.iter().map(|href| context.resolve(href)).collect()
    }
}

impl Default for BookListParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextualParser for BookListParser {
    type Output = Vec<String>;
    type Context = ParseContext;

    /// Collect the hrefs of all book detail-page anchors, in document order.
    ///
    /// A page with no matching anchors yields an empty list, never an error.
    fn parse_with_context(
        &self,
        html: &Html,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output> {
        let mut urls = Vec::new();

        for node in html.tree.root().descendants() {
            let Some(element) = node.value().as_element() else {
                continue;
            };
            if element.name() != "a" {
                continue;
            }

            if let Some(href) = element.attr("href") {
                if href.starts_with(&self.indicators.book_url_prefix) {
                    urls.push(href.to_string());
                }
            }
        }

        debug!(
            page_id = context.page_id,
            matches = urls.len(),
            "collected book links from listing page"
        );

        Ok(urls)
    }
}
