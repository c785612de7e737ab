//! Areas of interest.
//!
//! The grid only ever looks at an AOI's bounding box, so anything that can
//! produce one can be tiled.

use geo::BoundingRect;
use geo_types::{Geometry, MultiPolygon, Polygon, Rect};

use super::error::GridError;

/// An area of interest that can be tiled against the grid.
pub trait Aoi {
    /// Bounding box in (lon, lat) degrees, or `None` for empty geometry.
    fn aoi_bounds(&self) -> Option<Rect<f64>>;
}

impl Aoi for Polygon<f64> {
    fn aoi_bounds(&self) -> Option<Rect<f64>> {
        self.bounding_rect()
    }
}

impl Aoi for MultiPolygon<f64> {
    fn aoi_bounds(&self) -> Option<Rect<f64>> {
        self.bounding_rect()
    }
}

impl Aoi for Rect<f64> {
    fn aoi_bounds(&self) -> Option<Rect<f64>> {
        Some(*self)
    }
}

impl Aoi for Geometry<f64> {
    fn aoi_bounds(&self) -> Option<Rect<f64>> {
        self.bounding_rect()
    }
}

impl<T: Aoi + ?Sized> Aoi for &T {
    fn aoi_bounds(&self) -> Option<Rect<f64>> {
        (**self).aoi_bounds()
    }
}

/// Resolve an AOI to a finite bounding box.
pub(crate) fn usable_bounds<A: Aoi + ?Sized>(aoi: &A) -> Result<Rect<f64>, GridError> {
    let bounds = aoi
        .aoi_bounds()
        .ok_or_else(|| GridError::InvalidGeometry("area of interest is empty".to_string()))?;
    let (min, max) = (bounds.min(), bounds.max());
    if [min.x, min.y, max.x, max.y].iter().any(|v| !v.is_finite()) {
        return Err(GridError::InvalidGeometry(format!(
            "area of interest has a non-finite bounding box: {:?}",
            bounds
        )));
    }
    Ok(bounds)
}
