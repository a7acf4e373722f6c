pub mod line_string;
pub mod polygon;
pub mod rectangle;

pub use self::line_string::{front_line, MapLineString};
pub use self::polygon::{MapPolygon, SplitResult};
pub use self::rectangle::MapRect;
