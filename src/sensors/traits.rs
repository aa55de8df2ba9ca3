//! Traits for sensor collection.

use crate::sensors::data::SensorSnapshot;

/// Source of the facts shown on each refresh.
///
/// Implementations must not fail: anything they cannot read is reported as
/// absent or zero inside the returned snapshot, so the display keeps
/// refreshing with partial information.
pub trait SensorSource {
    /// Gather a fresh snapshot for one refresh cycle.
    fn snapshot(&mut self) -> SensorSnapshot;
}
