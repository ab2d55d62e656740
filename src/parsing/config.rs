//! Parsing configuration for HTML extraction.
//!
//! Centralized indicator literals used to recognize which node encodes a
//! given field. The defaults match the Goodreads markup as currently
//! shipped; when the site changes shape, this is the one place to edit.

use serde::{Deserialize, Serialize};

/// Main parsing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Indicators for book listing pages
    pub book_list_indicators: BookListIndicators,

    /// Indicators for book detail pages
    pub book_detail_indicators: BookDetailIndicators,
}

/// Indicators for book listing pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookListIndicators {
    /// Path prefix of anchor hrefs that lead to a book detail page
    pub book_url_prefix: String,
}

impl Default for BookListIndicators {
    fn default() -> Self {
        Self {
            book_url_prefix: "/book/show/".to_string(),
        }
    }
}

/// Indicators for book detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetailIndicators {
    /// Path fragment of anchor hrefs whose last segment is the work id
    pub id_path_marker: String,

    /// Path fragment of anchor hrefs whose last segment is a genre name
    pub genre_path_marker: String,

    /// Class of the div wrapping the cover image
    pub cover_container_class: String,

    /// Class required on the cover img element itself
    pub cover_image_class: String,

    /// Role required on the cover img element itself
    pub cover_image_role: String,

    /// Class of the div whose text child is the average rating
    pub rating_class: String,

    /// Class of the div whose aria-label carries the ratings/reviews counts
    pub stats_class: String,

    /// Class of the div listing contributor links
    pub authors_class: String,

    /// Class required on the title h1
    pub title_class: String,

    /// data-testid required on the title h1
    pub title_testid: String,

    /// Literal prefix stripped from the title aria-label
    pub title_prefix: String,
}

impl Default for BookDetailIndicators {
    fn default() -> Self {
        Self {
            id_path_marker: "/work/quotes/".to_string(),
            genre_path_marker: "/genres/".to_string(),
            cover_container_class: "BookCover__image".to_string(),
            cover_image_class: "ResponsiveImage".to_string(),
            cover_image_role: "presentation".to_string(),
            rating_class: "RatingStatistics__rating".to_string(),
            stats_class: "RatingStatistics__meta".to_string(),
            authors_class: "ContributorLinksList".to_string(),
            title_class: "Text Text__title1".to_string(),
            title_testid: "bookTitle".to_string(),
            title_prefix: "Book title: ".to_string(),
        }
    }
}
