use crate::{crs::Crs, error::ConfigurationError};

use geo::{Area, Polygon};

/// The fixed measurement box of one glacier
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceBox {
    pub polygon: Polygon,
    pub width: f64,
    pub crs: Crs,
}

impl ReferenceBox {
    pub fn new(polygon: Polygon, width: f64, crs: Crs) -> Result<ReferenceBox, ConfigurationError> {
        if !width.is_finite() || width <= 0. {
            return Err(ConfigurationError::InvalidBoxWidth(width));
        }
        Ok(ReferenceBox {
            polygon,
            width,
            crs,
        })
    }

    /// Average length of a piece of the box along its axis, truncated to whole units
    pub fn length_of(&self, piece: &Polygon) -> i64 {
        (piece.unsigned_area() / self.width).trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_width_must_be_positive() {
        let polygon = polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)];

        for width in [0., -3., f64::NAN, f64::INFINITY] {
            assert!(ReferenceBox::new(polygon.clone(), width, Crs::Epsg(3057)).is_err());
        }
    }

    #[test]
    fn test_length_truncates() {
        let piece = polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 5.99), (x: 0., y: 5.99)];
        let reference_box = ReferenceBox::new(piece.clone(), 10., Crs::Epsg(3057)).unwrap();

        assert_eq!(reference_box.length_of(&piece), 5);
    }
}
