//! Goodreads book-page parsing library
//!
//! This crate turns already-parsed Goodreads HTML documents into structured
//! data. It has two independent pipelines over the same input type:
//!
//! - [`BookListParser`] collects book detail-page links from listing pages.
//! - [`BookDetailParser`] extracts a [`Book`] record (title, id, cover,
//!   authors, genres, rating statistics) from a detail page.
//!
//! The crate performs no network I/O and no persistence; callers parse HTML
//! with [`scraper::Html::parse_document`] and hand the tree in. Extraction is
//! best-effort: a missing or malformed field leaves its default value and is
//! reported through `tracing`, it never aborts the rest of the record.

pub mod domain;
pub mod parsing;

pub use domain::book::{Book, Books};
pub use parsing::{
    BookDetailIndicators, BookDetailParser, BookListIndicators, BookListParser, ContextualParser,
    DetailParseContext, ParseContext, ParsingConfig, ParsingError, ParsingResult,
};
