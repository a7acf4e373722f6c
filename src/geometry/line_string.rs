use super::MapRect;
use crate::error::GeometryError;

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Geometry, Line, LineString, Rect};

// fallback ray directions, tried when prolonging the end segments crosses the line
const FALLBACK_DIRECTIONS: usize = 16;

pub trait MapLineString {
    fn is_self_intersecting(&self) -> bool;
    fn extend_to(&self, frame: &Rect) -> Option<LineString>;
    fn extend_with(&self, frame: &Rect, start_direction: Coord, end_direction: Coord)
        -> Option<LineString>;
    fn simple_extension_to(&self, frame: &Rect) -> Option<LineString>;
}

impl MapLineString for LineString {
    fn is_self_intersecting(&self) -> bool {
        let segments: Vec<Line> = self.lines().collect();

        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                match line_intersection(segments[i], segments[j]) {
                    None => (),
                    // neighbouring segments always share their common vertex
                    Some(LineIntersection::SinglePoint { .. }) if j == i + 1 => (),
                    Some(_) => return true,
                }
            }
        }
        false
    }

    /// Prolongs the first and last segment until they hit the boundary of the frame.
    /// All vertices must lie strictly inside the frame
    fn extend_to(&self, frame: &Rect) -> Option<LineString> {
        let n = self.0.len();
        if n < 2 {
            return None;
        }
        self.extend_with(
            frame,
            self.0[0] - self.0[1],
            self.0[n - 1] - self.0[n - 2],
        )
    }

    /// Adds a ray from each end of the line to the boundary of the frame
    fn extend_with(
        &self,
        frame: &Rect,
        start_direction: Coord,
        end_direction: Coord,
    ) -> Option<LineString> {
        let (first, last) = (*self.0.first()?, *self.0.last()?);

        let start = frame.exit_point(first, start_direction)?;
        let end = frame.exit_point(last, end_direction)?;

        let mut coords = Vec::with_capacity(self.0.len() + 2);
        coords.push(start);
        coords.extend(self.0.iter().copied());
        coords.push(end);

        Some(LineString::new(coords))
    }

    /// An extension to the frame that does not cross itself.
    /// The prolonged end segments are preferred, a hooked end falls back
    /// to rays in evenly spread directions
    fn simple_extension_to(&self, frame: &Rect) -> Option<LineString> {
        if let Some(extended) = self.extend_to(frame).filter(|e| !e.is_self_intersecting()) {
            return Some(extended);
        }
        let n = self.0.len();
        if n < 2 {
            return None;
        }

        let compass = (0..FALLBACK_DIRECTIONS).map(|k| {
            let angle = k as f64 * std::f64::consts::TAU / FALLBACK_DIRECTIONS as f64;
            Coord {
                x: angle.cos(),
                y: angle.sin(),
            }
        });
        let start_directions: Vec<Coord> = std::iter::once(self.0[0] - self.0[1])
            .chain(compass.clone())
            .collect();
        let end_directions: Vec<Coord> = std::iter::once(self.0[n - 1] - self.0[n - 2])
            .chain(compass)
            .collect();

        for start in &start_directions {
            for end in &end_directions {
                if let Some(extended) = self.extend_with(frame, *start, *end) {
                    if !extended.is_self_intersecting() {
                        return Some(extended);
                    }
                }
            }
        }
        None
    }
}

/// Converts the raw geometry of a front line feature into a simple line
pub fn front_line(geometry: Option<&geojson::Geometry>) -> Result<LineString, GeometryError> {
    let geometry = geometry.ok_or(GeometryError::Missing)?;
    let geometry = Geometry::<f64>::try_from(geometry.clone())
        .map_err(|e| GeometryError::Unreadable(e.to_string()))?;

    let mut line = match geometry {
        Geometry::LineString(line) => line,
        Geometry::Line(line) => LineString::new(vec![line.start, line.end]),
        Geometry::MultiLineString(mut lines) if lines.0.len() == 1 => lines.0.remove(0),
        other => return Err(GeometryError::NotALine(geometry_name(&other))),
    };

    if line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    // repeated vertices make zero-length segments
    line.0.dedup();
    if line.0.len() < 2 {
        return Err(GeometryError::TooFewVertices);
    }

    if line.is_self_intersecting() {
        return Err(GeometryError::SelfIntersecting);
    }

    Ok(line)
}

fn geometry_name(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
