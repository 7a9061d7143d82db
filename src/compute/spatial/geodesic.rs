//! Geodesic distance along point sequences.
//!
//! Distances come from the Karney geodesic inverse on the WGS84 ellipsoid
//! (`geo::Geodesic`), never from planar lon/lat differences.

use crate::error::{Result, SelectError};
use geo::{Distance, Geodesic, Point};
use meshcut_types::units::DistanceUnit;
use ndarray::{ArrayD, IxDyn};

/// Cumulative geodesic distance in meters along one sequence of points.
///
/// The first entry is always 0. Extra entries in the longer sequence are
/// ignored; use [`distance_along_trajectory`] for checked input.
///
/// # Examples
///
/// ```
/// use meshcut::compute::spatial::cumulative_distance;
///
/// let dist = cumulative_distance(&[0.0, 1.0], &[0.0, 0.0]);
/// assert_eq!(dist[0], 0.0);
/// assert!((dist[1] - 111_319.5).abs() < 1.0);
/// ```
pub fn cumulative_distance<'a>(
    lons: impl IntoIterator<Item = &'a f64>,
    lats: impl IntoIterator<Item = &'a f64>,
) -> Vec<f64> {
    let mut dists = Vec::new();
    let mut total = 0.0;
    let mut previous: Option<Point> = None;

    for (&lon, &lat) in lons.into_iter().zip(lats) {
        let point = Point::new(lon, lat);
        if let Some(prev) = previous {
            total += Geodesic.distance(prev, point);
        }
        dists.push(total);
        previous = Some(point);
    }

    dists
}

/// Geodesic distance along a trajectory of longitudes and latitudes.
///
/// Computes the cumulative distance in meters from the first position to
/// every later one. A 1-D input is one trajectory; a 2-D input is a batch of
/// trajectories, one per row, each starting from 0. Rank-0 input is treated
/// as a single point.
///
/// # Errors
///
/// - [`SelectError::DimensionLengthMismatch`] when the shapes differ
/// - [`SelectError::UnsupportedDimensionality`] for more than 2 dimensions
pub fn distance_along_trajectory(lons: &ArrayD<f64>, lats: &ArrayD<f64>) -> Result<ArrayD<f64>> {
    if lons.ndim() > 2 {
        return Err(SelectError::UnsupportedDimensionality(lons.ndim()));
    }
    if lons.shape() != lats.shape() {
        return Err(SelectError::length_mismatch(
            "lat",
            lons.len(),
            lats.len(),
        ));
    }

    let (rows, width) = match lons.shape() {
        [] => (1, 1),
        [len] => (1, *len),
        [rows, width, ..] => (*rows, *width),
    };
    let lon_rows = lons.to_shape((rows, width))?;
    let lat_rows = lats.to_shape((rows, width))?;

    let values: Vec<f64> = lon_rows
        .rows()
        .into_iter()
        .zip(lat_rows.rows())
        .flat_map(|(lon, lat)| cumulative_distance(&lon, &lat))
        .collect();

    let shape = if lons.ndim() == 0 {
        vec![1]
    } else {
        lons.shape().to_vec()
    };
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
}

/// Picks meters or kilometers for displaying a distance series.
///
/// Returns the unit and the values rescaled to it. Meters win when more than
/// a third of the points (counted against the length of the first axis) are
/// shorter than one kilometer; otherwise the kilometer values are returned.
///
/// # Examples
///
/// ```
/// use meshcut::compute::spatial::normalize_distance;
/// use meshcut::DistanceUnit;
/// use ndarray::array;
///
/// let (unit, values) = normalize_distance(&array![5000.0, 5000.0, 5000.0].into_dyn());
/// assert_eq!(unit, DistanceUnit::Kilometers);
/// assert_eq!(values, array![5.0, 5.0, 5.0].into_dyn());
/// ```
pub fn normalize_distance(distance_in_m: &ArrayD<f64>) -> (DistanceUnit, ArrayD<f64>) {
    let distance_in_km = distance_in_m.mapv(|m| m / 1000.0);
    let below_one_km = distance_in_km.iter().filter(|&&km| km < 1.0).count();
    let leading_len = distance_in_m.shape().first().copied().unwrap_or(1);

    if below_one_km > leading_len / 3 {
        (DistanceUnit::Meters, distance_in_m.clone())
    } else {
        (DistanceUnit::Kilometers, distance_in_km)
    }
}
