//! Screen projection seam and map-space geometry.
//!
//! The engine clusters in screen-pixel space but never owns the camera: the
//! renderer supplies a [`Projector`] on demand. A Web Mercator
//! implementation is provided for hosts that render EPSG:3857 tiles, which
//! is what the upstream basemap uses.

use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis, metres. Spherical Mercator uses it as the sphere
/// radius.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A position in screen-pixel space. Origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another screen position, in pixels.
    pub fn distance_to(&self, other: &ScreenPos) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned bounding box over lon/lat coordinates.
///
/// Used as the extent of a multi-member cluster; the interaction layer
/// feeds it to the renderer's fit-to-extent animation.
///
/// # Examples
///
/// ```
/// use poimap::geo::BoundingBox;
///
/// let mut bbox = BoundingBox::from_point(120.0, 23.0);
/// bbox.extend(121.0, 24.5);
/// assert_eq!(bbox.center(), (120.5, 23.75));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// A degenerate box containing a single coordinate.
    pub fn from_point(lon: f64, lat: f64) -> Self {
        Self {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        }
    }

    /// Grow the box to contain the given coordinate.
    pub fn extend(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lon = self.max_lon.max(lon);
        self.max_lat = self.max_lat.max(lat);
    }

    /// Midpoint of the box as `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Maps geographic coordinates to the current screen.
///
/// Implementations are supplied by the renderer, which knows the camera.
/// The engine only ever calls [`Projector::project`] during a cluster
/// rebuild, so implementations may borrow view state freely.
pub trait Projector {
    /// Project a lon/lat coordinate into screen-pixel space.
    fn project(&self, lon: f64, lat: f64) -> ScreenPos;
}

/// Spherical (Web) Mercator projection to screen pixels, EPSG:3857.
///
/// `origin` is the map-space coordinate (metres) of the viewport's top-left
/// corner and `resolution` the metres-per-pixel of the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercatorProjector {
    /// Map-space x of the viewport's left edge, metres.
    pub origin_x: f64,
    /// Map-space y of the viewport's top edge, metres.
    pub origin_y: f64,
    /// Metres per pixel.
    pub resolution: f64,
}

impl WebMercatorProjector {
    pub fn new(origin_x: f64, origin_y: f64, resolution: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            resolution,
        }
    }

    /// Projector for a viewport of `width x height` pixels centered on the
    /// given coordinate.
    pub fn centered(lon: f64, lat: f64, resolution: f64, width_px: f64, height_px: f64) -> Self {
        let (cx, cy) = lon_lat_to_mercator(lon, lat);
        Self {
            origin_x: cx - width_px / 2.0 * resolution,
            origin_y: cy + height_px / 2.0 * resolution,
            resolution,
        }
    }
}

impl Projector for WebMercatorProjector {
    fn project(&self, lon: f64, lat: f64) -> ScreenPos {
        let (mx, my) = lon_lat_to_mercator(lon, lat);
        ScreenPos {
            x: (mx - self.origin_x) / self.resolution,
            y: (self.origin_y - my) / self.resolution,
        }
    }
}

/// Forward spherical Mercator: lon/lat degrees to map-space metres.
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M
        * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
            .tan()
            .ln();
    (x, y)
}
