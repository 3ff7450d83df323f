//! Mission progress. The simulation only ever pushes deltas into it.

/// Receiver for mission deltas produced by the simulation.
pub trait MissionSink {
    /// Called at most once per tick, and only with a nonzero count.
    fn samples_collected(&mut self, delta: u32);
}

/// Default mission state: a running sample tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissionState {
    pub samples_collected: u32,
}

impl MissionSink for MissionState {
    fn samples_collected(&mut self, delta: u32) {
        self.samples_collected = self.samples_collected.saturating_add(delta);
    }
}
