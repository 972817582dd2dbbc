use serde::{Deserialize, Serialize};

/// The user-tunable collection parameters, published to the acquisition side
/// whenever a collection is armed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectionParams {
    /// Camera integration time per frame, in seconds
    pub exposure_time: f64,
    /// Total stage tilt covered by the sweep, in degrees
    pub tilt_range: f64,
    /// Tilt step between frames, in degrees
    pub step_size: f64,
}

impl Default for CollectionParams {
    fn default() -> Self {
        CollectionParams {
            exposure_time: 0.5,
            tilt_range: 10.0,
            step_size: 0.2,
        }
    }
}

impl std::fmt::Display for CollectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "exposure {} s, tilt range {} deg, step size {} deg",
            self.exposure_time, self.tilt_range, self.step_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = CollectionParams::default();
        assert_eq!(params.exposure_time, 0.5);
        assert_eq!(params.tilt_range, 10.0);
        assert_eq!(params.step_size, 0.2);
    }
}
