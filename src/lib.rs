pub mod crs;
pub mod error;
pub mod geometry;
pub mod glacier;
pub mod parameters;
pub mod steps;

#[cfg(test)]
mod test_fixtures;

pub use error::{Error, Result};
