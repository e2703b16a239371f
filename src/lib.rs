//! # poimap
//!
//! In-memory engine for rendering geocoded points of interest on an
//! interactive map: spatial clustering, cached style resolution, and
//! business-hours evaluation.
//!
//! The crate owns no I/O and no rendering. A loader hands it validated
//! records, a renderer hands it the current view resolution and a screen
//! projector, and it hands back clusters, pick results, and visual styles.
//!
//! ## Features
//!
//! - **Point storage**: validated, insertion-ordered in-memory store with
//!   CRUD and bulk load ([`store::PointStore`])
//! - **Filtering**: conjunctive category / keyword / open-now selection
//!   ([`filter`])
//! - **Clustering**: greedy fixed-point grouping in screen-pixel space with
//!   rebuild debouncing and pick resolution ([`cluster::ClusterIndex`])
//! - **Styling**: signature-keyed memoizing style cache with
//!   clone-and-decorate labels ([`style::StyleResolver`])
//! - **Business hours**: tolerant parser and evaluator for the
//!   `週一-五 09:00-18:00` micro-format ([`hours`])
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`core`]: Domain models (`Point`, `Category`, `PointDraft`)
//! - [`geo`]: Screen projection seam and bounding boxes
//! - [`hours`]: Business-hours parsing and open-now evaluation
//! - [`store`]: Canonical point storage
//! - [`filter`]: Visible-subset selection
//! - [`cluster`]: Spatial grouping and click-pick resolution
//! - [`style`]: Visual style derivation and caching
//! - [`loader`]: Raw record ingestion and validation
//! - [`config`]: TOML engine settings
//!
//! ## Data flow
//!
//! ```text
//! loader -> PointStore -> filter::apply -> ClusterIndex::build
//!                                             |            \
//!                                             v             v
//!                                      StyleResolver    resolve_pick
//!                                      (renderer)       (interaction)
//! ```
//!
//! All core operations are synchronous and total over their documented
//! inputs: malformed data degrades (dropped point, skipped window), unknown
//! categories fall back to [`core::Category::Other`], and empty results are
//! valid states rather than errors.

pub mod cluster;
pub mod config;
pub mod core;
pub mod filter;
pub mod geo;
pub mod hours;
pub mod loader;
pub mod store;
pub mod style;

pub use cluster::{Cluster, ClusterConfig, ClusterIndex, PickResult};
pub use config::EngineConfig;
pub use core::{Category, Point, PointDraft, PointId};
pub use filter::FilterCriteria;
pub use geo::{BoundingBox, Projector, ScreenPos, WebMercatorProjector};
pub use hours::TimeWindow;
pub use loader::RawRecord;
pub use store::PointStore;
pub use style::{StyleResolver, StyleSettings, VisualStyle};
