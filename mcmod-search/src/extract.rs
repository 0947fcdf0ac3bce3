//! Turns one result node into a typed [`Record`].
//!
//! Expected shape of a result entry on the upstream page:
//!
//! ```text
//! div.result-item
//! ├── div.head                 title, e.g. "[IC2] 工业时代2 (Industrial Craft 2)"
//! ├── div.body                 description
//! └── span.info
//!     ├── a[href]              address
//!     └── span.value × n       metadata values; index 1 is the snapshot time
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::ResultNode;
use crate::error::ExtractError;
use crate::types::{ModMetadata, Record};

const INFO: &str = "span.info";
const ANCHOR: &str = "a";
const HEAD: &str = "div.head";
const BODY: &str = "div.body";
const INFO_VALUE: &str = "span.info span.value";

/// Index of the snapshot-time value inside the info region.
const SNAPSHOT_VALUE_INDEX: usize = 1;

static MCMOD_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(class|modpack)/(\d+)\.html")
        .expect("mcmod id pattern is hardcoded and must be valid")
});

/// Canonical host every address is rewritten to.
const CANONICAL_HOST: &str = "www.mcmod.cn";

/// Alternate hosts that serve the same pages.
const ALTERNATE_HOSTS: &[&str] = &["center.mcmod.cn", "search.mcmod.cn"];

/// Extract a [`Record`] from a single result node.
///
/// # Errors
///
/// Returns [`ExtractError`] if any required child node is absent or the
/// address is empty. The caller is expected to skip the node.
pub fn extract_record<N: ResultNode>(node: &N) -> Result<Record, ExtractError> {
    let href = require(&require(node, INFO, 0)?, ANCHOR, 0)?
        .attribute("href")
        .ok_or(ExtractError::MissingAddress)?;
    let address = normalize_address(&href);
    if address.is_empty() {
        return Err(ExtractError::MissingAddress);
    }
    let mcmod_id = mcmod_id_from_address(&address);

    let title = require(node, HEAD, 0)?.text_content().trim().to_owned();
    let parts = split_title(&title);

    let description = require(node, BODY, 0)?.text_content().trim().to_owned();
    let snapshot_time = require(node, INFO_VALUE, SNAPSHOT_VALUE_INDEX)?
        .text_content()
        .trim()
        .to_owned();

    Ok(Record {
        address,
        title,
        description,
        snapshot_time,
        metadata: ModMetadata {
            mcmod_id,
            abbr: parts.abbr,
            chinese_name: parts.chinese_name,
            sub_name: parts.sub_name,
            category: None,
        },
    })
}

fn require<N: ResultNode>(
    node: &N,
    selector: &'static str,
    index: usize,
) -> Result<N, ExtractError> {
    node.find(selector, index)
        .ok_or(ExtractError::MissingNode { selector, index })
}

/// Normalise a result address to its canonical form.
///
/// 1. Protocol-relative `//host/...` gets an `https:` scheme.
/// 2. Alternate mcmod hosts are rewritten to `www.mcmod.cn`.
/// 3. Backslashes become forward slashes.
///
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use mcmod_search::extract::normalize_address;
///
/// assert_eq!(
///     normalize_address("//center.mcmod.cn/class/5.html"),
///     "https://www.mcmod.cn/class/5.html"
/// );
/// ```
pub fn normalize_address(raw: &str) -> String {
    let mut address = if raw.starts_with("//") {
        format!("https:{raw}")
    } else {
        raw.to_owned()
    };
    for host in ALTERNATE_HOSTS {
        address = address.replace(host, CANONICAL_HOST);
    }
    address.replace('\\', "/")
}

/// Pull the numeric page id out of a `/class/<id>.html` or
/// `/modpack/<id>.html` address. The first such segment wins.
pub fn mcmod_id_from_address(address: &str) -> Option<String> {
    MCMOD_ID
        .captures(address)
        .and_then(|caps| caps.get(2))
        .map(|id| id.as_str().to_owned())
}

/// Name components parsed out of a result title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    /// Text inside a leading `[...]` tag.
    pub abbr: Option<String>,
    /// Name before the first ` (`, or the whole main title.
    pub chinese_name: String,
    /// Text after the first ` (` with trailing `)` removed.
    pub sub_name: Option<String>,
}

/// Split a title like `[IC2] 工业时代2 (Industrial Craft 2)` into its parts.
///
/// A leading `[` without a matching `] ` separator is treated as part of the
/// name rather than an abbreviation.
pub fn split_title(title: &str) -> TitleParts {
    let (abbr, main_title) = match title
        .strip_prefix('[')
        .and_then(|rest| rest.split_once("] "))
    {
        Some((abbr, main)) => (Some(abbr.to_owned()), main),
        None => (None, title),
    };

    let (chinese_name, sub_name) = match main_title.split_once(" (") {
        Some((name, sub)) => (name.to_owned(), Some(sub.trim_end_matches(')').to_owned())),
        None => (main_title.to_owned(), None),
    };

    TitleParts {
        abbr,
        chinese_name,
        sub_name,
    }
}
