use serde::{Deserialize, Serialize};

/// Book metadata extracted from a detail page.
///
/// Created empty at the start of an extraction and filled in place by
/// whichever field extractor matches. Fields that never match keep their
/// default (empty string, empty list, zero). `url` is the one field no
/// extractor writes; the detail parser copies it from the caller-supplied
/// context, since only the caller knows which link the document came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub url: String,
    pub id: String,
    pub cover_url: String,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub rating: f64,
    pub ratings: u64,
    pub reviews: u64,
}

/// Collection wrapper for serialized output of multiple extractions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Books {
    pub books: Vec<Book>,
}
