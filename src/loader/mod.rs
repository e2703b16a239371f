//! Raw record ingestion and validation.
//!
//! The host fetches and decodes the source data (a published spreadsheet);
//! this module turns its rows into validated [`PointDraft`]s. Every field
//! arrives as text, exactly as the sheet exports it, so numeric fields are
//! parsed here and anything unusable is dropped rather than surfaced as an
//! error — transport failures are the host's problem, bad rows are ours to
//! tolerate.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Category, PointDraft};

/// One source row, field names matching the sheet's column headers.
///
/// All fields are optional at this layer; [`RawRecord::validate`] decides
/// what is admissible. The 審核 (approval) column gates publication: only
/// rows whose value is the literal `TRUE` (case-insensitive) are loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "工廠名稱", default)]
    pub name: String,
    #[serde(rename = "分類", default)]
    pub category: String,
    #[serde(rename = "經度", default)]
    pub longitude: String,
    #[serde(rename = "緯度", default)]
    pub latitude: String,
    #[serde(rename = "地址", default)]
    pub address: String,
    #[serde(rename = "聯絡方式", default)]
    pub contact: String,
    #[serde(rename = "營業時間", default)]
    pub hours: String,
    #[serde(rename = "公司產品", default)]
    pub product: String,
    #[serde(rename = "電話", default)]
    pub phone: String,
    #[serde(rename = "傳真", default)]
    pub fax: String,
    #[serde(rename = "信箱", default)]
    pub email: String,
    #[serde(rename = "網頁", default)]
    pub website: String,
    #[serde(rename = "審核", default)]
    pub approved: String,
}

impl RawRecord {
    /// Whether the approval column marks this row as published.
    pub fn is_approved(&self) -> bool {
        self.approved.trim().eq_ignore_ascii_case("true")
    }

    /// Validate this record into a draft.
    ///
    /// Requires approval, a non-empty name, and parseable finite
    /// coordinates. The category label resolves through
    /// [`Category::parse`], so unknown labels land in the fallback bucket
    /// instead of failing the row.
    pub fn validate(&self) -> Option<PointDraft> {
        if !self.is_approved() {
            return None;
        }

        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }

        let longitude: f64 = self.longitude.trim().parse().ok()?;
        let latitude: f64 = self.latitude.trim().parse().ok()?;
        if !longitude.is_finite() || !latitude.is_finite() {
            return None;
        }

        let mut draft = PointDraft::new(name, Category::parse(&self.category), longitude, latitude);
        draft.address = self.address.trim().to_string();
        draft.contact = self.contact.trim().to_string();
        draft.hours = self.hours.trim().to_string();
        draft.product = self.product.trim().to_string();
        draft.phone = non_empty(&self.phone);
        draft.fax = non_empty(&self.fax);
        draft.email = non_empty(&self.email);
        draft.website = non_empty(&self.website);
        Some(draft)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a JSON array of records, as produced by the host's sheet decoder.
///
/// This is the loader's one fallible entry point: transport-adjacent
/// decoding errors surface to the caller, while per-row problems are left
/// for [`RawRecord::validate`] to drop later.
pub fn parse_records_json(json: &str) -> Result<Vec<RawRecord>> {
    serde_json::from_str(json).context("Failed to deserialize point records JSON")
}
