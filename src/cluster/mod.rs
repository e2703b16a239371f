//! Spatial grouping of screen-proximate points.
//!
//! Clustering runs in screen-pixel space over the currently visible point
//! subset and is recomputed wholesale whenever that subset or the view
//! resolution changes materially — clusters are never mutated
//! incrementally, which rules out stale-membership bugs at a recompute cost
//! the dataset size (low thousands) easily absorbs.
//!
//! The grouping is greedy single-linkage run to a fixed point, followed by
//! a merge pass that collapses clusters whose anchors sit closer than the
//! minimum separation. It is an approximation of true single-linkage — not
//! order-independent — and downstream style caching depends on reproducing
//! exactly this behavior, so the algorithm is index-addressed and
//! deterministic.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::geo::{BoundingBox, Projector, ScreenPos};

/// Clustering thresholds, all in screen pixels except the epsilon.
///
/// The two distance thresholds play distinct roles: `distance_px` drives
/// absorption of points into a growing cluster, `min_distance_px` is the
/// minimum separation tolerated between finished clusters — pairs closer
/// than it are merged, which keeps nearly-coincident groups from
/// flickering between one and two markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Absorption threshold: a point joins a cluster when its screen
    /// distance to any current member is below this.
    #[serde(default = "default_distance_px")]
    pub distance_px: f64,
    /// Minimum separation between cluster anchors; closer pairs merge.
    #[serde(default = "default_min_distance_px")]
    pub min_distance_px: f64,
    /// Resolution changes smaller than this do not warrant a rebuild.
    #[serde(default = "default_resolution_epsilon")]
    pub resolution_epsilon: f64,
}

fn default_distance_px() -> f64 {
    50.0
}

fn default_min_distance_px() -> f64 {
    25.0
}

fn default_resolution_epsilon() -> f64 {
    1e-9
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            distance_px: default_distance_px(),
            min_distance_px: default_min_distance_px(),
            resolution_epsilon: default_resolution_epsilon(),
        }
    }
}

/// A group of one or more points presented as a single marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Member points in input order. Never empty.
    pub members: Vec<Point>,
    /// Screen position of the marker: the member's own projected
    /// coordinate for singletons, the members' centroid otherwise.
    pub anchor: ScreenPos,
    /// Lon/lat bounds of the members; `Some` only for multi-member
    /// clusters, where the interaction layer uses it to fit the view.
    pub extent: Option<BoundingBox>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    /// The point a singleton marker stands for; for multi-member clusters,
    /// the first member in input order.
    pub fn representative(&self) -> &Point {
        &self.members[0]
    }
}

/// What a screen pick resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum PickResult {
    /// A lone entity; the host opens its detail view.
    Single(Point),
    /// A multi-member cluster; the host fits the view to the extent.
    Cluster {
        members: Vec<Point>,
        extent: BoundingBox,
    },
}

/// The clusters for one (point subset, resolution) configuration.
///
/// Build a fresh index on every material change; [`ClusterIndex::needs_rebuild`]
/// debounces resolution jitter below the configured epsilon.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterIndex {
    clusters: Vec<Cluster>,
    resolution: f64,
    config: ClusterConfig,
}

impl ClusterIndex {
    /// Group the given points under the projector's current view.
    ///
    /// Points are scanned in input order; each not-yet-clustered point
    /// seeds a cluster which then absorbs, to a fixed point, every
    /// remaining unclustered point within `distance_px` of any current
    /// member. A final pass merges clusters whose anchors lie closer than
    /// `min_distance_px`.
    pub fn build(
        points: &[Point],
        config: &ClusterConfig,
        projector: &dyn Projector,
        resolution: f64,
    ) -> Self {
        let positions: Vec<ScreenPos> = points
            .iter()
            .map(|p| projector.project(p.longitude, p.latitude))
            .collect();

        let mut assigned = vec![false; points.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for seed in 0..points.len() {
            if assigned[seed] {
                continue;
            }
            assigned[seed] = true;
            let mut members = vec![seed];

            // Absorb until no unclustered point is within reach of any
            // member.
            loop {
                let mut absorbed = false;
                for candidate in seed + 1..points.len() {
                    if assigned[candidate] {
                        continue;
                    }
                    let near = members.iter().any(|&m| {
                        positions[m].distance_to(&positions[candidate]) < config.distance_px
                    });
                    if near {
                        assigned[candidate] = true;
                        members.push(candidate);
                        absorbed = true;
                    }
                }
                if !absorbed {
                    break;
                }
            }

            members.sort_unstable();
            groups.push(members);
        }

        merge_close_groups(&mut groups, &positions, config.min_distance_px);

        let clusters: Vec<Cluster> = groups
            .into_iter()
            .map(|indices| make_cluster(points, &positions, indices))
            .collect();

        debug!(
            "clustered {} points into {} markers at resolution {}",
            points.len(),
            clusters.len(),
            resolution
        );

        Self {
            clusters,
            resolution,
            config: *config,
        }
    }

    /// The clusters, in seed order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The resolution this index was built for.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Whether a view at `resolution` differs enough from the built one to
    /// warrant a rebuild. Changes within the configured epsilon are float
    /// jitter, not camera movement.
    pub fn needs_rebuild(&self, resolution: f64) -> bool {
        (resolution - self.resolution).abs() > self.config.resolution_epsilon
    }

    /// Resolve a screen pick to the nearest marker within the pick radius.
    ///
    /// Returns `None` when nothing is close enough. Ties go to the earlier
    /// cluster, matching the deterministic build order.
    pub fn resolve_pick(&self, pixel: ScreenPos, pick_radius_px: f64) -> Option<PickResult> {
        let mut best: Option<(f64, &Cluster)> = None;
        for cluster in &self.clusters {
            let distance = cluster.anchor.distance_to(&pixel);
            if distance > pick_radius_px {
                continue;
            }
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, cluster));
            }
        }

        best.map(|(_, cluster)| {
            if cluster.is_single() {
                PickResult::Single(cluster.members[0].clone())
            } else {
                PickResult::Cluster {
                    members: cluster.members.clone(),
                    extent: cluster
                        .extent
                        .expect("multi-member cluster always has an extent"),
                }
            }
        })
    }
}

/// Merge groups whose centroids sit closer than the minimum separation,
/// repeating until every surviving pair is far enough apart.
fn merge_close_groups(groups: &mut Vec<Vec<usize>>, positions: &[ScreenPos], min_distance: f64) {
    loop {
        let anchors: Vec<ScreenPos> = groups.iter().map(|g| centroid(g, positions)).collect();

        let mut merge_pair = None;
        'outer: for i in 0..groups.len() {
            for j in i + 1..groups.len() {
                if anchors[i].distance_to(&anchors[j]) < min_distance {
                    merge_pair = Some((i, j));
                    break 'outer;
                }
            }
        }

        match merge_pair {
            Some((i, j)) => {
                let absorbed = groups.remove(j);
                groups[i].extend(absorbed);
                groups[i].sort_unstable();
            }
            None => break,
        }
    }
}

fn centroid(indices: &[usize], positions: &[ScreenPos]) -> ScreenPos {
    let n = indices.len() as f64;
    let (sx, sy) = indices.iter().fold((0.0, 0.0), |(sx, sy), &i| {
        (sx + positions[i].x, sy + positions[i].y)
    });
    ScreenPos::new(sx / n, sy / n)
}

fn make_cluster(points: &[Point], positions: &[ScreenPos], indices: Vec<usize>) -> Cluster {
    let anchor = if indices.len() == 1 {
        positions[indices[0]]
    } else {
        centroid(&indices, positions)
    };

    let extent = if indices.len() > 1 {
        let first = &points[indices[0]];
        let mut bbox = BoundingBox::from_point(first.longitude, first.latitude);
        for &i in &indices[1..] {
            bbox.extend(points[i].longitude, points[i].latitude);
        }
        Some(bbox)
    } else {
        None
    };

    Cluster {
        members: indices.into_iter().map(|i| points[i].clone()).collect(),
        anchor,
        extent,
    }
}
