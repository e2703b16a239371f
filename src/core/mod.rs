//! Core domain models.

pub mod domain;

pub use domain::{Category, Point, PointDraft, PointId};
