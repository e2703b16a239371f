//! Domain models for points of interest.
//!
//! This module provides the core data structures that represent geocoded
//! business entities: the fixed category set, stable point identifiers, and
//! the immutable point record owned by the store.

use serde::{Deserialize, Serialize};

/// Business category of a point of interest.
///
/// The category set is closed; labels that match none of the known
/// categories resolve to [`Category::Other`], which also serves as the
/// style fallback for unknown data.
///
/// # Examples
///
/// ```
/// use poimap::core::Category;
///
/// assert_eq!(Category::parse("材料"), Category::Materials);
/// assert_eq!(Category::parse("something else"), Category::Other);
/// assert_eq!(Category::Machining.label(), "加工");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// 材料 — raw materials
    Materials,
    /// 零件 — parts and components
    Parts,
    /// 加工 — machining and processing
    Machining,
    /// 設備 — equipment
    Equipment,
    /// 工具 — tooling
    Tools,
    /// 維修 — repair services
    Repair,
    /// 物流 — logistics
    Logistics,
    /// 其他 — catch-all fallback
    Other,
}

// Serialize as the display label; deserialize through the tolerant lookup so
// unknown labels resolve to the fallback instead of failing the record.
impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::parse(&label))
    }
}

impl Category {
    /// All categories in display order, for legend and filter population.
    pub const ALL: [Category; 8] = [
        Category::Materials,
        Category::Parts,
        Category::Machining,
        Category::Equipment,
        Category::Tools,
        Category::Repair,
        Category::Logistics,
        Category::Other,
    ];

    /// Display label of this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Materials => "材料",
            Category::Parts => "零件",
            Category::Machining => "加工",
            Category::Equipment => "設備",
            Category::Tools => "工具",
            Category::Repair => "維修",
            Category::Logistics => "物流",
            Category::Other => "其他",
        }
    }

    /// Resolve a raw label to a category.
    ///
    /// Unknown or empty labels fall back to [`Category::Other`]; this is a
    /// lookup-miss, never an error.
    pub fn parse(label: &str) -> Category {
        match label.trim() {
            "材料" => Category::Materials,
            "零件" => Category::Parts,
            "加工" => Category::Machining,
            "設備" => Category::Equipment,
            "工具" => Category::Tools,
            "維修" => Category::Repair,
            "物流" => Category::Logistics,
            _ => Category::Other,
        }
    }
}

/// Stable identifier of a point within a session.
///
/// Identifiers are assigned by the store at insertion time and are never
/// reused, so a replaced point always carries a fresh id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PointId(pub u64);

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated point record without an identity, ready for insertion.
///
/// Drafts are produced by the loader (or constructed directly) and turned
/// into [`Point`]s by the store, which assigns the id. Coordinate validity
/// is re-checked at insertion: non-finite coordinates are rejected.
///
/// # Examples
///
/// ```
/// use poimap::core::{Category, PointDraft};
///
/// let draft = PointDraft::new("大同鐵材行", Category::Materials, 120.68, 24.14);
/// assert!(draft.is_valid());
///
/// let bad = PointDraft::new("", Category::Other, f64::NAN, 24.14);
/// assert!(!bad.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDraft {
    pub name: String,
    pub category: Category,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl PointDraft {
    /// Create a draft with the required fields; descriptive fields start
    /// empty.
    pub fn new(name: impl Into<String>, category: Category, longitude: f64, latitude: f64) -> Self {
        Self {
            name: name.into(),
            category,
            longitude,
            latitude,
            address: String::new(),
            contact: String::new(),
            hours: String::new(),
            product: String::new(),
            phone: None,
            fax: None,
            email: None,
            website: None,
        }
    }

    /// Whether this draft satisfies the store's admission rules: a
    /// non-empty name and finite coordinates.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Attach an identity, producing the immutable point record.
    pub fn into_point(self, id: PointId) -> Point {
        Point {
            id,
            name: self.name,
            category: self.category,
            longitude: self.longitude,
            latitude: self.latitude,
            address: self.address,
            contact: self.contact,
            hours: self.hours,
            product: self.product,
            phone: self.phone,
            fax: self.fax,
            email: self.email,
            website: self.website,
        }
    }
}

/// An immutable geocoded point of interest.
///
/// Points are owned exclusively by the [`crate::store::PointStore`] and are
/// never mutated in place; an edit removes the old record and inserts a new
/// one under a fresh [`PointId`]. The `hours` field carries the raw
/// business-hours string as authored, which may be empty or malformed — it
/// is interpreted lazily by [`crate::hours`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub category: Category,
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub contact: String,
    pub hours: String,
    pub product: String,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}
