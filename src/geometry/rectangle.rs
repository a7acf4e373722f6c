use geo::{Coord, Rect};

pub trait MapRect {
    fn merge(&self, other: &Rect) -> Rect;
    fn grow(&self, margin: f64) -> Rect;
    fn exit_point(&self, from: Coord, direction: Coord) -> Option<Coord>;
    fn perimeter_position(&self, point: Coord) -> f64;
    fn corners_between(&self, from: Coord, to: Coord) -> Vec<Coord>;
}

impl MapRect for Rect {
    fn merge(&self, other: &Rect) -> Rect {
        Rect::new(
            Coord {
                x: self.min().x.min(other.min().x),
                y: self.min().y.min(other.min().y),
            },
            Coord {
                x: self.max().x.max(other.max().x),
                y: self.max().y.max(other.max().y),
            },
        )
    }

    fn grow(&self, margin: f64) -> Rect {
        Rect::new(
            Coord {
                x: self.min().x - margin,
                y: self.min().y - margin,
            },
            Coord {
                x: self.max().x + margin,
                y: self.max().y + margin,
            },
        )
    }

    /// Where a ray from a point inside the rectangle leaves it.
    /// The hit coordinate is snapped onto the boundary
    fn exit_point(&self, from: Coord, direction: Coord) -> Option<Coord> {
        let (min, max) = (self.min(), self.max());

        let s_x = if direction.x > 0. {
            Some((max.x - from.x) / direction.x)
        } else if direction.x < 0. {
            Some((min.x - from.x) / direction.x)
        } else {
            None
        };
        let s_y = if direction.y > 0. {
            Some((max.y - from.y) / direction.y)
        } else if direction.y < 0. {
            Some((min.y - from.y) / direction.y)
        } else {
            None
        };

        let hit = |s: f64| Coord {
            x: (from.x + s * direction.x).clamp(min.x, max.x),
            y: (from.y + s * direction.y).clamp(min.y, max.y),
        };

        match (s_x, s_y) {
            (Some(sx), Some(sy)) if sx <= sy => Some(Coord {
                x: if direction.x > 0. { max.x } else { min.x },
                ..hit(sx)
            }),
            (_, Some(sy)) => Some(Coord {
                y: if direction.y > 0. { max.y } else { min.y },
                ..hit(sy)
            }),
            (Some(sx), None) => Some(Coord {
                x: if direction.x > 0. { max.x } else { min.x },
                ..hit(sx)
            }),
            (None, None) => None,
        }
    }

    /// Counter-clockwise distance along the boundary from the lower left corner
    fn perimeter_position(&self, point: Coord) -> f64 {
        let (min, max) = (self.min(), self.max());
        let (w, h) = (self.width(), self.height());

        let edges = [
            ((point.y - min.y).abs(), point.x - min.x),
            ((point.x - max.x).abs(), w + point.y - min.y),
            ((point.y - max.y).abs(), w + h + max.x - point.x),
            ((point.x - min.x).abs(), 2. * w + h + max.y - point.y),
        ];

        edges
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, position)| position)
            .unwrap_or(0.)
    }

    /// The corners passed when walking the boundary counter-clockwise
    /// from one boundary point to another, in walking order
    fn corners_between(&self, from: Coord, to: Coord) -> Vec<Coord> {
        let (min, max) = (self.min(), self.max());
        let (w, h) = (self.width(), self.height());
        let perimeter = 2. * (w + h);

        let start = self.perimeter_position(from);
        let span = (self.perimeter_position(to) - start).rem_euclid(perimeter);

        let corners = [
            (0., Coord { x: min.x, y: min.y }),
            (w, Coord { x: max.x, y: min.y }),
            (w + h, Coord { x: max.x, y: max.y }),
            (2. * w + h, Coord { x: min.x, y: max.y }),
        ];

        let mut passed: Vec<(f64, Coord)> = corners
            .into_iter()
            .map(|(position, corner)| ((position - start).rem_euclid(perimeter), corner))
            .filter(|(offset, _)| *offset > 0. && *offset < span)
            .collect();
        passed.sort_by(|a, b| a.0.total_cmp(&b.0));

        passed.into_iter().map(|(_, corner)| corner).collect()
    }
}
