use std::fmt::Display;

/// Which side of a front line is the glacier.
///
/// Sides are seen from the first vertex of the digitized line looking towards
/// its last vertex. A box drawn starting on the upstream part of the glacier,
/// with fronts digitized in the same rotational sense, keeps the glacier on the left.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BoxOrientation {
    #[default]
    Left,
    Right,
}

impl BoxOrientation {
    pub fn from_invert(invert: bool) -> BoxOrientation {
        if invert {
            BoxOrientation::Right
        } else {
            BoxOrientation::Left
        }
    }
}

impl Display for BoxOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxOrientation::Left => f.write_str("left of the front"),
            BoxOrientation::Right => f.write_str("right of the front"),
        }
    }
}
