//! Swarm member layout. Phases are a pure function of member index, so a
//! swarm definition always produces the same relative formation.

/// Clock offset between consecutive members.
pub const MEMBER_PHASE_STEP: f32 = 0.15;
/// Members are spread across this many longitudinal lanes.
pub const LANE_COUNT: usize = 10;
/// Longitudinal spacing between lanes.
pub const LANE_SPACING: f32 = 0.8;

/// Per-member motion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberPhase {
    /// Added to the swarm clock before evaluating this member's sinusoids.
    pub phase: f32,
    /// Constant longitudinal offset of this member's lane.
    pub lane: f32,
}

impl MemberPhase {
    pub fn for_index(index: usize) -> Self {
        Self {
            phase: index as f32 * MEMBER_PHASE_STEP,
            lane: (index % LANE_COUNT) as f32 * LANE_SPACING,
        }
    }
}

/// Phase table for one swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmPhaseTable {
    members: Vec<MemberPhase>,
}

impl SwarmPhaseTable {
    pub fn new(member_count: usize) -> Self {
        Self {
            members: (0..member_count).map(MemberPhase::for_index).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MemberPhase> {
        self.members.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberPhase> {
        self.members.iter()
    }
}
