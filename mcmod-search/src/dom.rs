//! Queryable view over parsed result markup.
//!
//! The extractor only needs three capabilities from a node: a selector
//! lookup that reports absence as `None`, its text, and its attributes.
//! [`ResultNode`] captures exactly that so extraction can be driven by
//! [`scraper`] in production and by hand-built nodes in tests.

use scraper::{ElementRef, Html, Selector};

/// Container holding every result on the search page.
pub const RESULT_LIST: &str = "div.search-result-list";

/// A single result entry inside [`RESULT_LIST`].
pub const RESULT_ITEM: &str = "div.result-item";

/// A node of parsed markup that supports selector-based child lookup.
pub trait ResultNode: Sized {
    /// Returns the `index`-th descendant matching `selector`, or `None`
    /// when there are not that many matches.
    fn find(&self, selector: &'static str, index: usize) -> Option<Self>;

    /// Concatenated text of this node and its descendants, untrimmed.
    fn text_content(&self) -> String;

    /// Value of the attribute `name`, if set.
    fn attribute(&self, name: &str) -> Option<String>;
}

impl ResultNode for ElementRef<'_> {
    fn find(&self, selector: &'static str, index: usize) -> Option<Self> {
        // Selectors are compile-time constants; an unparsable one behaves
        // like a selector that matches nothing.
        let selector = Selector::parse(selector).ok()?;
        self.select(&selector).nth(index)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_owned)
    }
}

/// Locate every result node on a parsed search page, in document order.
///
/// Returns `None` when the results container itself is missing, which the
/// pipeline treats as an empty result set.
pub fn result_nodes(document: &Html) -> Option<Vec<ElementRef<'_>>> {
    let list = document.root_element().find(RESULT_LIST, 0)?;
    let item = Selector::parse(RESULT_ITEM).ok()?;
    Some(list.select(&item).collect())
}
