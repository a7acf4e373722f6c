pub mod front_line;
pub mod measurement;
pub mod orientation;
pub mod reference_box;
pub mod reference_years;

pub use self::front_line::{FrontLine, FrontLines};
pub use self::measurement::{
    Anchor, Diagnostic, FrontMeasurement, GlacierTimeSeries, MeasurementRecord,
};
pub use self::orientation::BoxOrientation;
pub use self::reference_box::ReferenceBox;
pub use self::reference_years::ReferenceYears;
