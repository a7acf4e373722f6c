use super::{MapLineString, MapRect};
use crate::glacier::BoxOrientation;

use geo::{
    Area, BooleanOps, BoundingRect, Closest, ClosestPoint, Contains, Coord, Intersects, Line,
    LineString, MultiPolygon, Point, Polygon,
};
use log::debug;

// pieces smaller than this share of the box are boolean-op slivers
const SLIVER_RATIO: f64 = 1e-9;
// boundary points closer than this share of the frame size coincide
const TOLERANCE_RATIO: f64 = 1e-6;

/// The pieces of a polygon cut along a line, grouped by the side of the line they lie on
#[derive(Debug, Clone, PartialEq)]
pub enum SplitResult {
    /// The line does not cut through the polygon
    Unsplit,
    Split {
        left: Vec<Polygon>,
        right: Vec<Polygon>,
    },
}

impl SplitResult {
    pub fn pieces(&self) -> usize {
        match self {
            SplitResult::Unsplit => 1,
            SplitResult::Split { left, right } => left.len() + right.len(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.pieces() > 1
    }

    /// The largest piece on the side the orientation points at
    pub fn principal(&self, orientation: BoxOrientation) -> Option<&Polygon> {
        let SplitResult::Split { left, right } = self else {
            return None;
        };
        let side = match orientation {
            BoxOrientation::Left => left,
            BoxOrientation::Right => right,
        };
        side.iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
    }
}

pub trait MapPolygon {
    fn split_along(&self, line: &LineString) -> SplitResult;
}

impl MapPolygon for Polygon {
    /// Cuts the polygon along a line that passes all the way through it.
    ///
    /// The ends of the line are joined to a frame well outside both geometries,
    /// and the part of the frame to the left of the joined line (looking from its
    /// first towards its last vertex) is closed along the frame boundary. The left
    /// pieces are the polygon intersected with that region, the right pieces are
    /// what remains. Pieces cut apart only by the joining rays are glued back, so
    /// the polygon is cut by the digitized line alone.
    fn split_along(&self, line: &LineString) -> SplitResult {
        let (Some(first), Some(last)) = (line.0.first(), line.0.last()) else {
            return SplitResult::Unsplit;
        };
        if line.0.len() < 2 {
            return SplitResult::Unsplit;
        }

        // a line ending inside the polygon does not cut it
        if self.contains(&Point::from(*first)) || self.contains(&Point::from(*last)) {
            debug!("Front line ends inside the box");
            return SplitResult::Unsplit;
        }
        if !self.intersects(line) {
            debug!("Front line does not touch the box");
            return SplitResult::Unsplit;
        }

        let (Some(polygon_bounds), Some(line_bounds)) = (self.bounding_rect(), line.bounding_rect())
        else {
            return SplitResult::Unsplit;
        };
        let bounds = polygon_bounds.merge(&line_bounds);
        let size = bounds.width().max(bounds.height());
        let frame = bounds.grow(size / 2. + 1.);

        let Some(extended) = line.simple_extension_to(&frame) else {
            debug!("Front line cannot be joined to the frame without crossing itself");
            return SplitResult::Unsplit;
        };

        let (start, end) = (extended.0[0], extended.0[extended.0.len() - 1]);
        let mut ring = extended.0;
        ring.extend(frame.corners_between(end, start));
        let left_region = Polygon::new(LineString::new(ring), vec![]);

        let min_area = self.unsigned_area() * SLIVER_RATIO;
        let sides = self
            .intersection(&left_region)
            .into_iter()
            .map(|p| (p, BoxOrientation::Left))
            .chain(
                self.difference(&left_region)
                    .into_iter()
                    .map(|p| (p, BoxOrientation::Right)),
            )
            .filter(|(p, _)| p.unsigned_area() > min_area)
            .collect();

        let mut left = vec![];
        let mut right = vec![];
        for (piece, side) in glue_ray_cuts(sides, line, size * TOLERANCE_RATIO) {
            match side {
                BoxOrientation::Left => left.push(piece),
                BoxOrientation::Right => right.push(piece),
            }
        }
        debug!(
            "Split into {} left and {} right pieces",
            left.len(),
            right.len()
        );

        if left.is_empty() && right.is_empty() {
            return SplitResult::Unsplit;
        }
        SplitResult::Split { left, right }
    }
}

/// Merges neighbouring pieces whose common boundary is not part of the line.
/// A merged piece takes the side of its largest part touching the line
fn glue_ray_cuts(
    pieces: Vec<(Polygon, BoxOrientation)>,
    line: &LineString,
    tolerance: f64,
) -> Vec<(Polygon, BoxOrientation)> {
    let n = pieces.len();
    let mut group: Vec<usize> = (0..n).collect();

    for i in 0..n {
        for j in (i + 1)..n {
            if group[i] != group[j] && shares_ray_cut(&pieces[i].0, &pieces[j].0, line, tolerance)
            {
                let (from, to) = (group[j], group[i]);
                group.iter_mut().filter(|g| **g == from).for_each(|g| *g = to);
            }
        }
    }

    let touches_line: Vec<bool> = pieces
        .iter()
        .map(|(p, _)| edges(p).any(|e| lies_on(line, e, tolerance)))
        .collect();

    let mut glued = vec![];
    for id in 0..n {
        let members: Vec<usize> = (0..n).filter(|&i| group[i] == id).collect();
        if members.is_empty() {
            continue;
        }
        if members.len() > 1 {
            debug!("Gluing {} pieces cut apart by the prolonged line", members.len());
        }

        let side = largest(&pieces, members.iter().copied().filter(|&i| touches_line[i]))
            .or_else(|| largest(&pieces, members.iter().copied()))
            .map(|i| pieces[i].1)
            .unwrap_or_default();

        let merged = members
            .iter()
            .map(|&i| MultiPolygon::new(vec![pieces[i].0.clone()]))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| MultiPolygon::new(vec![]));

        glued.extend(merged.into_iter().map(|p| (p, side)));
    }
    glued
}

fn largest(
    pieces: &[(Polygon, BoxOrientation)],
    candidates: impl Iterator<Item = usize>,
) -> Option<usize> {
    candidates.max_by(|&a, &b| {
        pieces[a]
            .0
            .unsigned_area()
            .total_cmp(&pieces[b].0.unsigned_area())
    })
}

fn edges(polygon: &Polygon) -> impl Iterator<Item = Line> + '_ {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .flat_map(|ring| ring.lines())
}

fn near(line: &LineString, coord: Coord, tolerance: f64) -> bool {
    match line.closest_point(&Point::from(coord)) {
        Closest::Intersection(_) => true,
        Closest::SinglePoint(p) => {
            let d = p.0 - coord;
            d.x.hypot(d.y) <= tolerance
        }
        Closest::Indeterminate => false,
    }
}

/// Both ends and the middle of the edge are on the line
fn lies_on(line: &LineString, edge: Line, tolerance: f64) -> bool {
    let middle = edge.start + edge.delta() / 2.;
    near(line, edge.start, tolerance) && near(line, edge.end, tolerance) && near(line, middle, tolerance)
}

fn shares_ray_cut(a: &Polygon, b: &Polygon, line: &LineString, tolerance: f64) -> bool {
    edges(a).any(|edge| {
        let d = edge.delta();
        d.x.hypot(d.y) > tolerance
            && !lies_on(line, edge, tolerance)
            && std::iter::once(b.exterior())
                .chain(b.interiors())
                .any(|ring| lies_on(ring, edge, tolerance))
    })
}
