use geo::{Polygon, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned longitude/latitude box in degrees.
///
/// Wraps `geo::Rect`. Bounds are inclusive on every side. The box is ordered
/// `(min_lon, min_lat, max_lon, max_lat)`, from lower-left to upper-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// Create a bounding box from its lower-left and upper-right corners.
    ///
    /// The bounds are stored as given; use [`BoundingBox::is_ordered`] (or the
    /// validation in the `meshcut` crate) to reject inverted boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshcut_types::bbox::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(-74.0, 40.7, -73.9, 40.8);
    /// assert!(bbox.is_ordered());
    /// ```
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Create a bounding box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    #[inline]
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    #[inline]
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    #[inline]
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    #[inline]
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Bounds as `[min_lon, min_lat, max_lon, max_lat]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// `true` when `min_lon <= max_lon` and `min_lat <= max_lat`.
    pub fn is_ordered(&self) -> bool {
        self.min_lon <= self.max_lon && self.min_lat <= self.max_lat
    }

    /// Inclusive containment of a longitude/latitude pair.
    #[inline]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Expand the bounding box by a given amount of degrees in all directions.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.min_lon - amount,
            self.min_lat - amount,
            self.max_lon + amount,
            self.max_lat + amount,
        )
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            geo::coord! { x: self.min_lon, y: self.min_lat },
            geo::coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// The box as a closed rectangular polygon.
    pub fn to_polygon(&self) -> Polygon {
        self.to_rect().to_polygon()
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([min_lon, min_lat, max_lon, max_lat]: [f64; 4]) -> Self {
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl From<(f64, f64, f64, f64)> for BoundingBox {
    fn from((min_lon, min_lat, max_lon, max_lat): (f64, f64, f64, f64)) -> Self {
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(bbox.contains(0.0, 0.0));
        assert!(bbox.contains(1.0, 1.0));
        assert!(bbox.contains(0.5, 0.5));
        assert!(!bbox.contains(1.000001, 0.5));
    }

    #[test]
    fn test_is_ordered() {
        assert!(BoundingBox::from([0.0, 0.0, 0.0, 0.0]).is_ordered());
        assert!(!BoundingBox::from((1.0, 0.0, 0.0, 1.0)).is_ordered());
    }

    #[test]
    fn test_to_polygon() {
        let bbox = BoundingBox::new(-1.0, -2.0, 1.0, 2.0);
        let polygon = bbox.to_polygon();
        assert_eq!(polygon.exterior().0.len(), 5);
        assert!(polygon.contains(&geo::Point::new(0.5, 1.5)));
        assert_eq!(BoundingBox::from(bbox.to_rect()), bbox);
    }
}
