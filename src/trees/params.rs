use std::error::Error;

/// Class entropy below which a node stops splitting. A heuristic cutoff: a two-class branch
/// falls under it once the minority class is below about 19% of its rows.
pub const DEFAULT_MIN_ENTROPY: f64 = 0.70;

#[derive(Clone, Debug, PartialEq)]
pub struct Id3Params {
    min_entropy: f64,
}

impl Default for Id3Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Id3Params {
    pub fn new() -> Self {
        Self {
            min_entropy: DEFAULT_MIN_ENTROPY,
        }
    }

    pub fn set_min_entropy(&mut self, min_entropy: f64) -> Result<(), Box<dyn Error>> {
        if !min_entropy.is_finite() || min_entropy < 0.0 {
            return Err("The minimum entropy must be a finite, non-negative number.".into());
        }
        self.min_entropy = min_entropy;
        Ok(())
    }

    pub fn min_entropy(&self) -> f64 {
        self.min_entropy
    }
}
