//! Read criteria: optional filters, ordering and pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===========================================
// Bounds
// ===========================================

/// An optional range. Either side may be absent, meaning unconstrained.
///
/// Whether a bound is inclusive is decided by the filter that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> Bounds<T> {
    pub fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn starting(start: T) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(end: T) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Returns true if neither bound is set, so the filter is a no-op.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

// ===========================================
// Ordering
// ===========================================

/// Fields a note listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Created,
    Modified,
    /// Time of the note's most recent review record.
    Played,
    English,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Created,
        SortField::Modified,
        SortField::Played,
        SortField::English,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Created => "created",
            SortField::Modified => "modified",
            SortField::Played => "played",
            SortField::English => "english",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a sort field outside the allowlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortFieldError(String);

impl fmt::Display for ParseSortFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort field '{}' (expected created, modified, played or english)",
            self.0
        )
    }
}

impl std::error::Error for ParseSortFieldError {}

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == needle)
            .ok_or_else(|| ParseSortFieldError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// How a note listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Whatever order the engine returns rows in.
    #[default]
    Unordered,
    By {
        field: SortField,
        direction: SortDirection,
    },
    /// A fresh random permutation on every read.
    Random,
}

impl Ordering {
    pub fn asc(field: SortField) -> Self {
        Ordering::By {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Ordering::By {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Resolves a loosely specified ordering.
    ///
    /// Random wins over a field. A field name outside the allowlist leaves the
    /// listing unordered rather than failing the read.
    pub fn resolve(field: Option<&str>, descending: bool, random: bool) -> Self {
        if random {
            return Ordering::Random;
        }
        match field.map(str::parse::<SortField>) {
            Some(Ok(field)) if descending => Ordering::desc(field),
            Some(Ok(field)) => Ordering::asc(field),
            _ => Ordering::Unordered,
        }
    }
}

// ===========================================
// Criteria
// ===========================================

/// The optional filters and ordering applied to a note listing.
///
/// Every filter is independent; an absent filter does not narrow the result.
/// All present filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Substring matched against every text field of a note.
    pub search: Option<String>,
    /// Keep notes that own at least one tag with any of these names.
    pub tags: Vec<String>,
    /// Keep notes reviewed within `[start, end)`.
    pub played: Bounds<DateTime<Utc>>,
    /// Keep notes whose mean correctness lies strictly inside `(start, end)`.
    pub rate: Bounds<f64>,
    pub ordering: Ordering,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    pub fn played(mut self, bounds: Bounds<DateTime<Utc>>) -> Self {
        self.played = bounds;
        self
    }

    pub fn rate(mut self, bounds: Bounds<f64>) -> Self {
        self.rate = bounds;
        self
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }
}

// ===========================================
// Pagination
// ===========================================

/// A 1-based page of a listing.
///
/// Construction never fails: a page below 1 becomes 1, a page beyond
/// `u32::MAX` saturates, and a size outside `1..=MAX_PAGE_SIZE` becomes
/// `DEFAULT_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 30;
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn new(page: i64, size: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let size = u32::try_from(size)
            .ok()
            .filter(|s| (1..=Self::MAX_PAGE_SIZE).contains(s))
            .unwrap_or(Self::DEFAULT_PAGE_SIZE);
        Self { page, size }
    }

    /// Builds a request from raw, possibly malformed, text.
    ///
    /// A page number too long for `i64` still counts as a large page.
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Self {
        let page = page.map(str::trim).and_then(parse_page_number).unwrap_or(1);
        let size = size
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(i64::from(Self::DEFAULT_PAGE_SIZE));
        Self::new(page, size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    /// Pages needed to show `total` rows.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.size))
    }
}

fn parse_page_number(s: &str) -> Option<i64> {
    match s.parse() {
        Ok(n) => Some(n),
        Err(_) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => Some(i64::MAX),
        Err(_) => None,
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results with the totals of the full listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            total_pages: request.total_pages(total),
            page: request.page(),
            page_size: request.size(),
        }
    }
}
