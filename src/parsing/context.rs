//! Parsing contexts carrying caller-side information.
//!
//! The document tree alone does not know which page it came from; contexts
//! supply that: a page id for diagnostics, the base URL for resolving
//! relative links, and for detail pages the link the document was fetched
//! from.

use url::Url;

use super::error::{ParsingError, ParsingResult};

/// Context for parsing a book listing page.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Page being parsed, for diagnostics
    pub page_id: u32,

    /// Base URL for resolving relative links
    pub base_url: String,
}

impl ParseContext {
    /// Create a new listing parse context.
    pub fn new(page_id: u32, base_url: impl Into<String>) -> Self {
        Self {
            page_id,
            base_url: base_url.into(),
        }
    }

    /// Resolve a collected href against this context's base URL.
    ///
    /// Absolute hrefs pass through unchanged; relative ones are joined
    /// against `base_url`.
    pub fn resolve(&self, href: &str) -> ParsingResult<String> {
        if href.starts_with("http://") || href.starts_with("https://") {
            return Ok(href.to_string());
        }

        let base = Url::parse(&self.base_url).map_err(|e| {
            ParsingError::url_resolution_failed(&self.base_url, format!("invalid base URL: {e}"))
        })?;

        let joined = base.join(href).map_err(|e| {
            ParsingError::url_resolution_failed(
                href,
                format!("failed to join against '{}': {e}", self.base_url),
            )
        })?;

        Ok(joined.to_string())
    }
}

/// Context for parsing a book detail page.
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Link this document was fetched from; copied into `Book::url`
    pub url: String,

    /// Base URL for resolving relative resources
    pub base_url: String,
}

impl DetailParseContext {
    /// Create a new detail parse context.
    pub fn new(url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            base_url: base_url.into(),
        }
    }
}
