//! Visual style derivation with a signature-keyed memo cache.
//!
//! Styles are described purely as data (colors, radii, label text); the
//! renderer turns them into actual marker graphics. Two rules keep the
//! cache correct:
//!
//! 1. Cluster styles are deterministic functions of cluster *size* — equal
//!    sizes render identically regardless of membership, which is the
//!    intended visual consistency, not a collision.
//! 2. Cached masters never carry entity- or zoom-specific decoration. A
//!    singleton's name label is attached to a clone of the cached base on
//!    every call; decorating the master would leak one entity's label onto
//!    every other entity of the same category.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::core::Category;

/// An RGBA color. Alpha is 0.0–1.0, matching CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form, for hosts that style markers via CSS.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);
const LABEL_TEXT: Rgba = Rgba::new(51, 51, 51, 1.0);
const LABEL_BACKGROUND: Rgba = Rgba::new(255, 255, 255, 0.85);
const LABEL_BORDER: Rgba = Rgba::new(59, 130, 246, 1.0);

/// Marker fill colors by size, cycled through for multi-member clusters.
pub const CLUSTER_PALETTE: [Rgba; 6] = [
    Rgba::new(2, 132, 199, 0.8),   // sky
    Rgba::new(217, 70, 239, 0.8),  // fuchsia
    Rgba::new(249, 115, 22, 0.8),  // orange
    Rgba::new(132, 204, 22, 0.8),  // lime
    Rgba::new(168, 85, 247, 0.8),  // purple
    Rgba::new(239, 68, 68, 0.8),   // red
];

/// Fill color for a singleton marker of the given category.
pub fn category_color(category: Category) -> Rgba {
    match category {
        Category::Materials => Rgba::new(59, 130, 246, 0.9),  // blue
        Category::Parts => Rgba::new(249, 115, 22, 0.9),      // orange
        Category::Machining => Rgba::new(16, 185, 129, 0.9),  // emerald
        Category::Equipment => Rgba::new(139, 92, 246, 0.9),  // violet
        Category::Tools => Rgba::new(234, 179, 8, 0.9),       // yellow
        Category::Repair => Rgba::new(239, 68, 68, 0.9),      // red
        Category::Logistics => Rgba::new(20, 184, 166, 0.9),  // teal
        Category::Other => Rgba::new(107, 114, 128, 0.8),     // gray
    }
}

/// Outline of a marker circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
}

/// The circular marker body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub radius: f64,
    pub fill: Rgba,
    pub stroke: StrokeStyle,
}

/// Optional text attached to a marker: a member count for clusters, a
/// truncated entity name for singletons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub text: String,
    pub font: String,
    pub fill: Rgba,
    pub background_fill: Option<Rgba>,
    pub background_stroke: Option<StrokeStyle>,
    /// Top, right, bottom, left — CSS order.
    pub padding: [f64; 4],
    /// Vertical offset from the marker center, pixels.
    pub offset_y: f64,
}

/// A complete renderable marker description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualStyle {
    pub circle: CircleStyle,
    pub label: Option<LabelStyle>,
}

/// Zoom- and label-related settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Singleton name labels show only when the view resolution is at or
    /// below this (i.e. zoomed in far enough).
    #[serde(default = "default_label_max_resolution")]
    pub label_max_resolution: f64,
    /// Names longer than this many characters are truncated with an
    /// ellipsis marker.
    #[serde(default = "default_label_truncate_chars")]
    pub label_truncate_chars: usize,
}

fn default_label_max_resolution() -> f64 {
    50.0
}

fn default_label_truncate_chars() -> usize {
    8
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            label_max_resolution: default_label_max_resolution(),
            label_truncate_chars: default_label_truncate_chars(),
        }
    }
}

/// Memoizing style resolver.
///
/// Styles are cached under a signature summarizing their visually-relevant
/// inputs: `cluster_{size}` for multi-member clusters (the count label is a
/// function of the key, so it is cached along), `single_{category}` for
/// singletons (cached *without* a label; the label is cloned on per call).
/// Resolution is total: unknown categories fall back to the
/// [`Category::Other`] color and the resolver never fails.
pub struct StyleResolver {
    cache: HashMap<String, VisualStyle>,
    settings: StyleSettings,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::with_settings(StyleSettings::default())
    }

    pub fn with_settings(settings: StyleSettings) -> Self {
        Self {
            cache: HashMap::new(),
            settings,
        }
    }

    /// Derive the style for a cluster or singleton at the current view
    /// resolution.
    pub fn resolve(&mut self, cluster: &Cluster, resolution: f64) -> VisualStyle {
        if cluster.len() > 1 {
            let size = cluster.len();
            let signature = format!("cluster_{}", size);
            self.cache
                .entry(signature)
                .or_insert_with(|| cluster_style(size))
                .clone()
        } else {
            let point = cluster.representative();
            let signature = format!("single_{}", point.category.label());
            let base = self
                .cache
                .entry(signature)
                .or_insert_with(|| single_base_style(point.category));

            // Clone before decorating: the cached master must stay free of
            // entity- and zoom-specific state.
            let mut style = base.clone();
            if resolution <= self.settings.label_max_resolution {
                style.label = Some(name_label(
                    &point.name,
                    self.settings.label_truncate_chars,
                ));
            }
            style
        }
    }

    /// Number of cached masters; useful for diagnostics.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn cluster_style(size: usize) -> VisualStyle {
    let color = CLUSTER_PALETTE[(size * 5) % CLUSTER_PALETTE.len()];
    VisualStyle {
        circle: CircleStyle {
            radius: 12.0 + size.min(20) as f64,
            fill: color,
            stroke: StrokeStyle {
                color: WHITE,
                width: 2.0,
            },
        },
        label: Some(LabelStyle {
            text: size.to_string(),
            font: "bold 12px sans-serif".to_string(),
            fill: WHITE,
            background_fill: None,
            background_stroke: None,
            padding: [0.0; 4],
            offset_y: 0.0,
        }),
    }
}

fn single_base_style(category: Category) -> VisualStyle {
    VisualStyle {
        circle: CircleStyle {
            radius: 8.0,
            fill: category_color(category),
            stroke: StrokeStyle {
                color: WHITE,
                width: 2.0,
            },
        },
        label: None,
    }
}

fn name_label(name: &str, truncate_chars: usize) -> LabelStyle {
    let text = if name.chars().count() > truncate_chars {
        let truncated: String = name.chars().take(truncate_chars).collect();
        format!("{}...", truncated)
    } else {
        name.to_string()
    };

    LabelStyle {
        text,
        font: "bold 13px sans-serif".to_string(),
        fill: LABEL_TEXT,
        background_fill: Some(LABEL_BACKGROUND),
        background_stroke: Some(StrokeStyle {
            color: LABEL_BORDER,
            width: 1.0,
        }),
        padding: [5.0, 7.0, 5.0, 7.0],
        offset_y: 22.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PointDraft, PointId};
    use crate::geo::ScreenPos;

    fn singleton(id: u64, name: &str, category: Category) -> Cluster {
        let point = PointDraft::new(name, category, 120.9, 23.9).into_point(PointId(id));
        Cluster {
            anchor: ScreenPos::new(0.0, 0.0),
            members: vec![point],
            extent: None,
        }
    }

    fn multi(size: usize) -> Cluster {
        let members: Vec<_> = (0..size as u64)
            .map(|i| {
                PointDraft::new(format!("點{}", i), Category::Other, 120.0 + i as f64, 23.0)
                    .into_point(PointId(i))
            })
            .collect();
        let mut extent = crate::geo::BoundingBox::from_point(120.0, 23.0);
        extent.extend(120.0 + (size - 1) as f64, 23.0);
        Cluster {
            anchor: ScreenPos::new(0.0, 0.0),
            members,
            extent: Some(extent),
        }
    }

    #[test]
    fn cluster_style_grows_with_size_up_to_cap() {
        let mut resolver = StyleResolver::new();
        let small = resolver.resolve(&multi(2), 100.0);
        let big = resolver.resolve(&multi(30), 100.0);
        assert_eq!(small.circle.radius, 14.0);
        assert_eq!(big.circle.radius, 32.0); // capped at 12 + 20
    }

    #[test]
    fn cluster_label_is_the_count() {
        let mut resolver = StyleResolver::new();
        let style = resolver.resolve(&multi(7), 100.0);
        assert_eq!(style.label.unwrap().text, "7");
    }

    #[test]
    fn equal_sizes_render_identically() {
        let mut resolver = StyleResolver::new();
        let a = resolver.resolve(&multi(4), 100.0);
        let b = resolver.resolve(&multi(4), 10.0);
        assert_eq!(a, b);
        assert_eq!(resolver.cache_len(), 1);
    }

    #[test]
    fn palette_selection_is_size_modulo() {
        let mut resolver = StyleResolver::new();
        let style = resolver.resolve(&multi(3), 100.0);
        // (3 * 5) % 6 == 3
        assert_eq!(style.circle.fill, CLUSTER_PALETTE[3]);
    }

    #[test]
    fn singleton_base_comes_from_category() {
        let mut resolver = StyleResolver::new();
        let style = resolver.resolve(&singleton(1, "工廠", Category::Repair), 100.0);
        assert_eq!(style.circle.radius, 8.0);
        assert_eq!(style.circle.fill, category_color(Category::Repair));
        assert!(style.label.is_none()); // zoomed out
    }

    #[test]
    fn label_appears_only_when_zoomed_in() {
        let mut resolver = StyleResolver::new();
        let zoomed_out = resolver.resolve(&singleton(1, "工廠", Category::Tools), 51.0);
        assert!(zoomed_out.label.is_none());

        let zoomed_in = resolver.resolve(&singleton(1, "工廠", Category::Tools), 50.0);
        assert_eq!(zoomed_in.label.unwrap().text, "工廠");
    }

    #[test]
    fn long_names_truncate_with_ellipsis() {
        let mut resolver = StyleResolver::new();
        let style = resolver.resolve(
            &singleton(1, "一二三四五六七八九十", Category::Other),
            10.0,
        );
        assert_eq!(style.label.unwrap().text, "一二三四五六七八...");
    }

    #[test]
    fn no_label_leakage_between_entities_of_same_category() {
        let mut resolver = StyleResolver::new();

        let a = resolver.resolve(&singleton(1, "甲工廠", Category::Materials), 10.0);
        let b = resolver.resolve(&singleton(2, "乙工廠", Category::Materials), 100.0);

        // A's label survives B's resolution untouched; B gets no label at
        // its zoomed-out resolution.
        assert_eq!(a.label.as_ref().unwrap().text, "甲工廠");
        assert!(b.label.is_none());

        // And resolving B zoomed-in yields B's own name, same base style.
        let b_in = resolver.resolve(&singleton(2, "乙工廠", Category::Materials), 10.0);
        assert_eq!(b_in.label.as_ref().unwrap().text, "乙工廠");
        assert_eq!(a.circle, b_in.circle);
    }

    #[test]
    fn cached_master_stays_label_free() {
        let mut resolver = StyleResolver::new();
        let _ = resolver.resolve(&singleton(1, "甲工廠", Category::Parts), 10.0);
        assert_eq!(resolver.cache_len(), 1);

        // A later zoomed-out resolve of the same category must come back
        // bare even though a labeled style was produced earlier.
        let bare = resolver.resolve(&singleton(2, "乙工廠", Category::Parts), 100.0);
        assert!(bare.label.is_none());
    }

    #[test]
    fn unknown_category_data_falls_back_to_other_color() {
        // Categories parse through the tolerant lookup, so unknown labels
        // arrive as Other and take the fallback color.
        let mut resolver = StyleResolver::new();
        let style = resolver.resolve(
            &singleton(1, "神秘工廠", Category::parse("未知")),
            100.0,
        );
        assert_eq!(style.circle.fill, category_color(Category::Other));
    }

    #[test]
    fn css_color_formatting() {
        assert_eq!(
            Rgba::new(59, 130, 246, 0.9).to_css(),
            "rgba(59, 130, 246, 0.9)"
        );
    }
}
