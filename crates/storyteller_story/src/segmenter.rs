//! Splitting story text into pages.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use storyteller_core::PageNumber;

// `[PAGE_1]`, `[page 2]`, `**[PAGE_3]**`
static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\**\[\s*PAGE[_\s]*(\d+)\s*\]\**").expect("Valid page marker regex")
});

/// Splits `[PAGE_n]`-delimited text into numbered pages.
///
/// # Examples
///
/// ```
/// use storyteller_story::PageSegmenter;
///
/// let pages = PageSegmenter::new(3).segment("[PAGE_2] B. [PAGE_1] A. [PAGE_4] D.");
/// let texts: Vec<_> = pages.values().map(String::as_str).collect();
/// assert_eq!(texts, ["A.", "B."]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSegmenter {
    max_pages: u32,
}

impl PageSegmenter {
    /// Segmenter keeping pages `1..=max_pages`.
    pub fn new(max_pages: u32) -> Self {
        Self { max_pages }
    }

    /// Pages keyed by the number written in each marker.
    ///
    /// Text before the first marker is ignored. Pages numbered zero or above
    /// the maximum are dropped. A repeated number keeps its last occurrence.
    pub fn segment(&self, raw: &str) -> BTreeMap<PageNumber, String> {
        let markers: Vec<_> = PAGE_MARKER
            .captures_iter(raw)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let number = caps.get(1).and_then(|n| n.as_str().parse::<u32>().ok());
                Some((whole.start(), whole.end(), number))
            })
            .collect();

        let mut pages = BTreeMap::new();
        for (index, (_, content_start, number)) in markers.iter().enumerate() {
            let content_end = markers
                .get(index + 1)
                .map(|(next_start, _, _)| *next_start)
                .unwrap_or(raw.len());

            let Some(page) = number.and_then(PageNumber::new) else {
                continue;
            };
            if page.get() > self.max_pages {
                continue;
            }
            pages.insert(page, raw[*content_start..content_end].trim().to_string());
        }
        pages
    }
}

/// The run of non-empty pages starting at page 1 with no gaps.
pub fn contiguous_prefix(pages: BTreeMap<PageNumber, String>) -> BTreeMap<PageNumber, String> {
    let mut expected = PageNumber::FIRST;
    pages
        .into_iter()
        .take_while(|(page, text)| {
            let keep = *page == expected && !text.is_empty();
            expected = expected.next();
            keep
        })
        .collect()
}
