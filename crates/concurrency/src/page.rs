//! Page windowing
//!
//! Maps a 1-based page number and a fixed page size onto a contiguous range
//! of the sorted key index. The last page may be short; a page starting past
//! the end is an error, except page 1 of an empty store which is empty.

use revkv_core::{Entry, Error, Result};
use std::ops::Range;

/// A validated 1-based page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u64);

impl PageNumber {
    /// The first page
    pub const FIRST: PageNumber = PageNumber(1);

    /// Validate a page number
    pub fn new(number: u64) -> Result<Self> {
        if number == 0 {
            return Err(Error::InvalidPage("page numbers start at 1".into()));
        }
        Ok(PageNumber(number))
    }

    /// Parse a raw page number; absent or empty means the first page
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("") => Ok(Self::FIRST),
            Some(raw) => {
                let number = raw
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidPage(format!("{:?} is not a page number", raw)))?;
                Self::new(number)
            }
        }
    }

    /// Raw page number
    pub fn get(self) -> u64 {
        self.0
    }

    /// Index positions covered by this page over `len` keys
    pub fn window(self, page_size: usize, len: usize) -> Result<Range<usize>> {
        let beyond = || Error::InvalidPage(format!("page {} is beyond the last page", self.0));

        let start = usize::try_from(self.0 - 1)
            .ok()
            .and_then(|n| n.checked_mul(page_size))
            .ok_or_else(beyond)?;

        if len == 0 && self == Self::FIRST {
            return Ok(0..0);
        }
        if start >= len {
            return Err(beyond());
        }
        Ok(start..len.min(start.saturating_add(page_size)))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Which page this is
    pub number: PageNumber,
    /// Entries in ascending key order
    pub entries: Vec<Entry>,
    /// Live entries in the whole store when the page was taken
    pub total: usize,
    /// Configured page size
    pub page_size: usize,
}

impl Page {
    /// Check if a later page would be non-empty
    pub fn has_next(&self) -> bool {
        let skipped = usize::try_from(self.number.get() - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.page_size);
        let seen = skipped.saturating_add(self.entries.len());
        seen < self.total
    }
}
