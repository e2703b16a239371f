//! Visible-subset selection.
//!
//! Combines a category filter, a keyword filter, and an open-now predicate
//! into a single conjunctive selection over the store's points. The
//! evaluation instant is an explicit parameter — callers wanting "now" pass
//! it in, tests pass a fixed instant.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::{Category, Point};
use crate::hours;

/// Selection criteria, AND-combined.
///
/// An unset criterion matches everything; the default criteria select every
/// point. The keyword matches case-insensitively against name, address, or
/// product (any one suffices).
///
/// # Examples
///
/// ```
/// use poimap::core::Category;
/// use poimap::filter::FilterCriteria;
///
/// let criteria = FilterCriteria::new()
///     .with_category(Category::Materials)
///     .with_keyword("鋼")
///     .open_only(true);
/// assert!(!criteria.is_unrestricted());
/// assert!(FilterCriteria::new().is_unrestricted());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub keyword: Option<String>,
    pub open_only: bool,
}

impl FilterCriteria {
    /// Criteria that match every point.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn open_only(mut self, open_only: bool) -> Self {
        self.open_only = open_only;
        self
    }

    /// Whether these criteria place no restriction at all.
    ///
    /// A blank keyword counts as unset, matching how the host's empty
    /// search box behaves.
    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none() && !self.open_only && self.effective_keyword().is_none()
    }

    fn effective_keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn matches(&self, point: &Point, at: NaiveDateTime) -> bool {
        if let Some(category) = self.category {
            if point.category != category {
                return false;
            }
        }

        if self.open_only && !hours::is_open_at(&point.hours, at) {
            return false;
        }

        if let Some(keyword) = self.effective_keyword() {
            let needle = keyword.to_lowercase();
            let hit = point.name.to_lowercase().contains(&needle)
                || point.address.to_lowercase().contains(&needle)
                || point.product.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Select the points matching the criteria at the given instant.
///
/// Pure, order-preserving, and non-destructive: the input slice is read
/// only and the result borrows from it in the original relative order. An
/// empty result is a valid state, not an error.
pub fn apply<'a>(
    points: &'a [Point],
    criteria: &FilterCriteria,
    at: NaiveDateTime,
) -> Vec<&'a Point> {
    points.iter().filter(|p| criteria.matches(p, at)).collect()
}
