//! Book extractor for detail pages.
//!
//! Walks the document tree once, depth-first in document order, and at each
//! element dispatches to the field extractors registered for its tag:
//! anchors feed the id and genre extractors, divs feed cover, rating, stats
//! and authors, and h1 feeds the title. Extractors are independent of each
//! other; every one either writes its field or leaves it untouched.
//!
//! The descent patterns inside the cover and author extractors mirror the
//! exact shape of the current Goodreads markup. When the site changes shape
//! these extractors stop matching and the field stays at its default; every
//! child access is guarded so a deviating document can never panic.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};
use tracing::{debug, warn};

use super::config::{BookDetailIndicators, ParsingConfig};
use super::context::DetailParseContext;
use super::error::{ParsingError, ParsingResult};
use super::ContextualParser;
use crate::domain::book::Book;

/// Parser for extracting book metadata from detail pages.
#[derive(Debug, Clone)]
pub struct BookDetailParser {
    indicators: BookDetailIndicators,
}

impl BookDetailParser {
    /// Create a new detail parser with the default Goodreads indicators.
    pub fn new() -> Self {
        Self::with_config(&ParsingConfig::default().book_detail_indicators)
    }

    /// Create a detail parser with custom indicators.
    pub fn with_config(indicators: &BookDetailIndicators) -> Self {
        Self {
            indicators: indicators.clone(),
        }
    }
}

impl Default for BookDetailParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextualParser for BookDetailParser {
    type Output = Book;
    type Context = DetailParseContext;

    /// Extract a best-effort [`Book`] record from a detail page.
    ///
    /// Always returns `Ok`: fields whose node is absent or malformed keep
    /// their default value, and numeric parse failures are reported through
    /// `tracing::warn!` instead of aborting the extraction.
    fn parse_with_context(
        &self,
        html: &Html,
        context: &Self::Context,
    ) -> ParsingResult<Self::Output> {
        debug!(url = %context.url, "extracting book details");

        let mut book = Book {
            url: context.url.clone(),
            ..Book::default()
        };

        for node in html.tree.root().descendants() {
            let Some(element) = node.value().as_element() else {
                continue;
            };

            match element.name() {
                "a" => {
                    self.extract_id(element, &mut book);
                    self.extract_genres(element, &mut book);
                }
                "div" => {
                    self.extract_cover(node, element, &mut book);
                    self.extract_rating(node, element, &mut book);
                    self.extract_stats(element, &mut book);
                    self.extract_authors(node, element, &mut book);
                }
                "h1" => self.extract_title(element, &mut book),
                _ => {}
            }
        }

        debug!(
            title = %book.title,
            authors = book.authors.len(),
            genres = book.genres.len(),
            "book extraction finished"
        );

        Ok(book)
    }
}

impl BookDetailParser {
    /// Take the work id from the last segment of a quotes-page href.
    fn extract_id(&self, element: &Element, book: &mut Book) {
        let Some(href) = element.attr("href") else {
            return;
        };
        if !href.contains(&self.indicators.id_path_marker) {
            return;
        }

        if let Some(id) = href.rsplit('/').next() {
            book.id = id.to_string();
        }
    }

    /// Append the last segment of a genre-page href; one entry per matching
    /// anchor across the whole document, in document order.
    fn extract_genres(&self, element: &Element, book: &mut Book) {
        let Some(href) = element.attr("href") else {
            return;
        };
        if !href.contains(&self.indicators.genre_path_marker) {
            return;
        }

        if let Some(genre) = href.rsplit('/').next() {
            book.genres.push(genre.to_string());
        }
    }

    fn extract_cover(&self, node: NodeRef<'_, Node>, element: &Element, book: &mut Book) {
        if element.attr("class") != Some(self.indicators.cover_container_class.as_str()) {
            return;
        }

        if let Some(src) = self.cover_image_src(node) {
            book.cover_url = src;
        }
    }

    /// Descend container -> first child -> first child, expecting the cover
    /// img there. The image must carry both the expected class and role
    /// before its src is trusted; a partial match yields nothing.
    fn cover_image_src(&self, container: NodeRef<'_, Node>) -> Option<String> {
        let wrapper = container.first_child()?;
        let image_node = wrapper.first_child()?;
        let image = image_node.value().as_element()?;
        if image.name() != "img" {
            return None;
        }

        let correct_class =
            image.attr("class") == Some(self.indicators.cover_image_class.as_str());
        let correct_role = image.attr("role") == Some(self.indicators.cover_image_role.as_str());
        if !correct_class || !correct_role {
            return None;
        }

        image.attr("src").map(str::to_string)
    }

    fn extract_rating(&self, node: NodeRef<'_, Node>, element: &Element, book: &mut Book) {
        if element.attr("class") != Some(self.indicators.rating_class.as_str()) {
            return;
        }

        let Some(child) = node.first_child() else {
            return;
        };
        let Some(text) = child.value().as_text() else {
            return;
        };

        match parse_rating(text.trim()) {
            Ok(value) => book.rating = value,
            Err(err) => warn!(error = %err, "failed to parse rating"),
        }
    }

    /// Read ratings and reviews counts from the stats aria-label.
    ///
    /// The label is expected to look like `"1,234 ratings, 56 reviews"`:
    /// token 0 carries the ratings count and token 3 the reviews count. The
    /// two tokens are handled independently, so a label that is usable on
    /// one side still fills the other.
    fn extract_stats(&self, element: &Element, book: &mut Book) {
        if element.attr("class") != Some(self.indicators.stats_class.as_str()) {
            return;
        }
        let Some(label) = element.attr("aria-label") else {
            return;
        };

        let tokens: Vec<&str> = label.split(' ').collect();

        match tokens
            .first()
            .ok_or_else(|| ParsingError::malformed_stats_label(label))
            .and_then(|token| parse_count(token))
        {
            Ok(count) => book.ratings = count,
            Err(err) => warn!(label, error = %err, "failed to extract ratings count"),
        }

        match tokens
            .get(3)
            .ok_or_else(|| ParsingError::malformed_stats_label(label))
            .and_then(|token| parse_count(token))
        {
            Ok(count) => book.reviews = count,
            Err(err) => warn!(label, error = %err, "failed to extract reviews count"),
        }
    }

    /// Collect the contributor names and replace the author list wholesale.
    ///
    /// Each direct child of the container is expected to hold an anchor
    /// whose first child is a span whose first child is the name text; any
    /// child deviating from that shape is skipped.
    fn extract_authors(&self, node: NodeRef<'_, Node>, element: &Element, book: &mut Book) {
        if element.attr("class") != Some(self.indicators.authors_class.as_str()) {
            return;
        }

        book.authors = node.children().filter_map(author_name).collect();
    }

    fn extract_title(&self, element: &Element, book: &mut Book) {
        let correct_class = element.attr("class") == Some(self.indicators.title_class.as_str());
        let correct_testid =
            element.attr("data-testid") == Some(self.indicators.title_testid.as_str());
        if !correct_class || !correct_testid {
            return;
        }

        let Some(label) = element.attr("aria-label") else {
            return;
        };

        match label.strip_prefix(&self.indicators.title_prefix) {
            Some(title) => book.title = title.to_string(),
            None => warn!(label, "title aria-label does not start with the expected prefix"),
        }
    }
}

fn author_name(contributor: NodeRef<'_, Node>) -> Option<String> {
    let anchor = contributor.first_child()?;
    if anchor.value().as_element()?.name() != "a" {
        return None;
    }

    let span = anchor.first_child()?;
    if span.value().as_element()?.name() != "span" {
        return None;
    }

    let name = span.first_child()?;
    let text = name.value().as_text()?;
    Some(text.trim().to_string())
}

fn parse_rating(value: &str) -> ParsingResult<f64> {
    value
        .parse()
        .map_err(|source| ParsingError::invalid_float(value, source))
}

/// Parse a count token, tolerating thousands-separator commas.
fn parse_count(value: &str) -> ParsingResult<u64> {
    value
        .replace(',', "")
        .parse()
        .map_err(|source| ParsingError::invalid_integer(value, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn context() -> DetailParseContext {
        DetailParseContext::new(
            "https://www.goodreads.com/book/show/44767458-dune",
            "https://www.goodreads.com",
        )
    }

    fn extract(body: &str) -> Book {
        let html = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        BookDetailParser::new()
            .parse_with_context(&html, &context())
            .unwrap()
    }

    #[test]
    fn empty_document_yields_default_record_with_caller_url() {
        let book = extract("<p>nothing to see</p>");
        assert_eq!(book.url, "https://www.goodreads.com/book/show/44767458-dune");
        assert!(book.title.is_empty());
        assert!(book.id.is_empty());
        assert!(book.cover_url.is_empty());
        assert!(book.authors.is_empty());
        assert!(book.genres.is_empty());
        assert_eq!(book.rating, 0.0);
        assert_eq!(book.ratings, 0);
        assert_eq!(book.reviews, 0);
    }

    #[test]
    fn id_comes_from_last_segment_of_quotes_href() {
        let book = extract(r#"<a href="/work/quotes/12345-foo">quotes</a>"#);
        assert_eq!(book.id, "12345-foo");
    }

    #[test]
    fn genres_accumulate_in_document_order() {
        let book = extract(concat!(
            r#"<a href="/genres/Fiction">Fiction</a>"#,
            r#"<a href="/author/show/58">not a genre</a>"#,
            r#"<a href="/genres/Drama">Drama</a>"#,
        ));
        assert_eq!(book.genres, vec!["Fiction", "Drama"]);
    }

    #[test]
    fn rating_parses_the_text_child() {
        let book = extract(r#"<div class="RatingStatistics__rating">4.25</div>"#);
        assert_eq!(book.rating, 4.25);
    }

    #[test]
    fn unparsable_rating_is_reported_not_fatal() {
        let book = extract(concat!(
            r#"<div class="RatingStatistics__rating">four and a bit</div>"#,
            r#"<a href="/genres/Fiction">Fiction</a>"#,
        ));
        assert_eq!(book.rating, 0.0);
        assert_eq!(book.genres, vec!["Fiction"]);
    }

    #[test]
    fn rating_div_without_text_child_is_skipped() {
        let book = extract(r#"<div class="RatingStatistics__rating"><span>4.25</span></div>"#);
        assert_eq!(book.rating, 0.0);
    }

    #[rstest]
    #[case("1,234 ratings, 56 reviews", 1234, 56)]
    #[case("10 ratings, 2 reviews", 10, 2)]
    #[case("1,234,567 ratings, 8,910 reviews", 1_234_567, 8910)]
    fn stats_label_fills_both_counters(
        #[case] label: &str,
        #[case] ratings: u64,
        #[case] reviews: u64,
    ) {
        let book = extract(&format!(
            r#"<div class="RatingStatistics__meta" aria-label="{label}"></div>"#
        ));
        assert_eq!(book.ratings, ratings);
        assert_eq!(book.reviews, reviews);
    }

    #[test]
    fn stats_label_with_too_few_tokens_fills_what_it_can() {
        // Only three space-delimited tokens: the ratings count still lands,
        // the reviews counter stays at its default.
        let book = extract(concat!(
            r#"<div class="RatingStatistics__meta" aria-label="1,234 ratings,56 reviews"></div>"#,
            r#"<a href="/genres/Fiction">Fiction</a>"#,
        ));
        assert_eq!(book.ratings, 1234);
        assert_eq!(book.reviews, 0);
        assert_eq!(book.genres, vec!["Fiction"]);
    }

    #[test]
    fn stats_without_the_indicator_class_are_ignored() {
        let book = extract(r#"<div aria-label="1,234 ratings, 56 reviews"></div>"#);
        assert_eq!(book.ratings, 0);
        assert_eq!(book.reviews, 0);
    }

    #[test]
    fn stats_without_aria_label_are_ignored() {
        let book = extract(r#"<div class="RatingStatistics__meta">1,234 ratings</div>"#);
        assert_eq!(book.ratings, 0);
        assert_eq!(book.reviews, 0);
    }

    #[test]
    fn title_requires_class_and_testid() {
        let book = extract(concat!(
            r#"<h1 class="Text Text__title1" aria-label="Book title: Not It">missing testid</h1>"#,
            r#"<h1 data-testid="bookTitle" aria-label="Book title: Not It Either">missing class</h1>"#,
            r#"<h1 class="Text Text__title1" data-testid="bookTitle" aria-label="Book title: Dune">Dune</h1>"#,
        ));
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn title_label_without_prefix_leaves_title_unset() {
        let book = extract(concat!(
            r#"<h1 class="Text Text__title1" data-testid="bookTitle" aria-label="Dune">Dune</h1>"#,
        ));
        assert!(book.title.is_empty());
    }

    #[test]
    fn cover_requires_both_image_class_and_role() {
        let class_only = extract(concat!(
            r#"<div class="BookCover__image"><div>"#,
            r#"<img class="ResponsiveImage" src="https://images.gr-assets.com/a.jpg">"#,
            r#"</div></div>"#,
        ));
        assert!(class_only.cover_url.is_empty());

        let role_only = extract(concat!(
            r#"<div class="BookCover__image"><div>"#,
            r#"<img role="presentation" src="https://images.gr-assets.com/b.jpg">"#,
            r#"</div></div>"#,
        ));
        assert!(role_only.cover_url.is_empty());

        let both = extract(concat!(
            r#"<div class="BookCover__image"><div>"#,
            r#"<img class="ResponsiveImage" role="presentation" src="https://images.gr-assets.com/c.jpg">"#,
            r#"</div></div>"#,
        ));
        assert_eq!(both.cover_url, "https://images.gr-assets.com/c.jpg");
    }

    #[test]
    fn cover_with_unexpected_structure_is_skipped() {
        // The img sits directly under the container instead of two levels
        // down; the rigid descent must no-op, not crash.
        let book = extract(concat!(
            r#"<div class="BookCover__image">"#,
            r#"<img class="ResponsiveImage" role="presentation" src="https://images.gr-assets.com/d.jpg">"#,
            r#"</div>"#,
        ));
        assert!(book.cover_url.is_empty());
    }

    #[test]
    fn authors_collects_conforming_children_and_skips_deviants() {
        let book = extract(concat!(
            r#"<div class="ContributorLinksList">"#,
            r#"<span><a href="/author/show/58"><span>Frank Herbert</span></a></span>"#,
            r#"<span><em>not an anchor</em></span>"#,
            r#"<span><a href="/author/show/59"><em>anchor without span</em></a></span>"#,
            r#"<span><a href="/author/show/60"><span>Brian Herbert</span></a></span>"#,
            r#"</div>"#,
        ));
        assert_eq!(book.authors, vec!["Frank Herbert", "Brian Herbert"]);
    }

    #[test]
    fn later_author_list_replaces_the_earlier_one() {
        let book = extract(concat!(
            r#"<div class="ContributorLinksList">"#,
            r#"<span><a href="/author/show/1"><span>First Author</span></a></span>"#,
            r#"</div>"#,
            r#"<div class="ContributorLinksList">"#,
            r#"<span><a href="/author/show/2"><span>Second Author</span></a></span>"#,
            r#"</div>"#,
        ));
        assert_eq!(book.authors, vec!["Second Author"]);
    }

    #[test]
    fn full_document_populates_every_field() {
        let body = concat!(
            r#"<h1 class="Text Text__title1" data-testid="bookTitle" aria-label="Book title: Dune">Dune</h1>"#,
            r#"<div class="BookCover__image"><div>"#,
            r#"<img class="ResponsiveImage" role="presentation" src="https://images.gr-assets.com/dune.jpg">"#,
            r#"</div></div>"#,
            r#"<div class="ContributorLinksList">"#,
            r#"<span><a href="/author/show/58"><span>Frank Herbert</span></a></span>"#,
            r#"</div>"#,
            r#"<div class="RatingStatistics__rating">4.25</div>"#,
            r#"<div class="RatingStatistics__meta" aria-label="1,234,567 ratings, 8,910 reviews"></div>"#,
            r#"<a href="/work/quotes/3634639-dune">quotes</a>"#,
            r#"<a href="/genres/science-fiction">Science Fiction</a>"#,
            r#"<a href="/genres/classics">Classics</a>"#,
        );

        let book = extract(body);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.url, "https://www.goodreads.com/book/show/44767458-dune");
        assert_eq!(book.id, "3634639-dune");
        assert_eq!(book.cover_url, "https://images.gr-assets.com/dune.jpg");
        assert_eq!(book.authors, vec!["Frank Herbert"]);
        assert_eq!(book.genres, vec!["science-fiction", "classics"]);
        assert_eq!(book.rating, 4.25);
        assert_eq!(book.ratings, 1_234_567);
        assert_eq!(book.reviews, 8910);
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = Html::parse_document(concat!(
            "<html><body>",
            r#"<h1 class="Text Text__title1" data-testid="bookTitle" aria-label="Book title: Dune">Dune</h1>"#,
            r#"<a href="/genres/classics">Classics</a>"#,
            r#"<div class="RatingStatistics__rating">4.25</div>"#,
            "</body></html>",
        ));

        let parser = BookDetailParser::new();
        let first = parser.parse_with_context(&html, &context()).unwrap();
        let second = parser.parse_with_context(&html, &context()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn count_parsing_strips_thousands_separators() {
        assert_eq!(parse_count("1,234").unwrap(), 1234);
        assert_eq!(parse_count("56").unwrap(), 56);
        assert_eq!(parse_count("1,234,567").unwrap(), 1_234_567);
        assert!(parse_count("ratings,").is_err());
    }
}
