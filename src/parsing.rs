//! HTML parsing infrastructure for the Goodreads book catalog.
//!
//! The parsers here operate on an externally supplied [`scraper::Html`] tree
//! and never fetch or mutate anything. Recognition is indicator-driven: each
//! field is located by a fixed class name, attribute key, or path prefix
//! defined centrally in [`config::ParsingConfig`], so a markup-shape change
//! on the site requires one edit.
//!
//! Error handling is two-tier. Producing the tree is the caller's concern;
//! once a tree exists, field-level failures (a missing node, a number that
//! does not parse) degrade to warnings and leave the affected field at its
//! default value. No field error ever aborts a whole extraction.

pub mod book_detail_parser;
pub mod book_list_parser;
pub mod config;
pub mod context;
pub mod error;

pub use book_detail_parser::BookDetailParser;
pub use book_list_parser::BookListParser;
pub use config::{BookDetailIndicators, BookListIndicators, ParsingConfig};
pub use context::{DetailParseContext, ParseContext};
pub use error::{ParsingError, ParsingResult};

use scraper::Html;

/// Parser trait with context support.
///
/// The context carries what the document itself cannot know: the page id for
/// diagnostics, the base URL for link resolution, and for detail pages the
/// originating link of the document.
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information.
    fn parse_with_context(
        &self,
        html: &Html,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output>;
}
