//! Page numbering.

use serde::{Deserialize, Serialize};

/// Number of pages in a story unless configured otherwise.
pub const DEFAULT_MAX_PAGES: u32 = 3;

/// A 1-based page number.
///
/// # Examples
///
/// ```
/// use storyteller_core::PageNumber;
///
/// assert!(PageNumber::new(0).is_none());
/// let second = PageNumber::FIRST.next();
/// assert_eq!(second.get(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u32", into = "u32")]
#[display("{_0}")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The opening page of every story.
    pub const FIRST: PageNumber = PageNumber(1);

    /// Create a page number, rejecting zero.
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// The raw page number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The following page.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = String;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| "page numbers start at 1".to_string())
    }
}

impl From<PageNumber> for u32 {
    fn from(page: PageNumber) -> Self {
        page.0
    }
}
