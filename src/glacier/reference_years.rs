/// Candidate years for the zero point of the relative positions.
/// Holds one entry per front line, so a year stays a candidate as long as
/// one of its lines has not failed
#[derive(Debug, Clone, Default)]
pub struct ReferenceYears(Vec<i32>);

impl ReferenceYears {
    pub fn new(years: impl IntoIterator<Item = i32>) -> ReferenceYears {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        ReferenceYears(years)
    }

    pub fn earliest(&self) -> Option<i32> {
        self.0.first().copied()
    }

    /// Drops the entry of a failed line. Returns true if the earliest year moved
    pub fn discard(&mut self, year: i32) -> bool {
        let before = self.earliest();
        if let Ok(i) = self.0.binary_search(&year) {
            self.0.remove(i);
        }
        before != self.earliest()
    }
}
