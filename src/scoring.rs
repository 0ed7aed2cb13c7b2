use crate::model::{ClimbDepth, EndgameDecoded, EndgameOutcome, PhaseCounters, ScoreBreakdown};

#[derive(Debug, Clone, Copy)]
pub struct PhaseWeights {
    pub level1: u32,
    pub level2: u32,
    pub level3: u32,
    pub level4: u32,
    pub processor: u32,
    pub barge: u32,
}

pub const AUTO_WEIGHTS: PhaseWeights = PhaseWeights {
    level1: 3,
    level2: 4,
    level3: 6,
    level4: 7,
    processor: 6,
    barge: 4,
};

pub const TELEOP_WEIGHTS: PhaseWeights = PhaseWeights {
    level1: 2,
    level2: 3,
    level3: 4,
    level4: 5,
    processor: 6,
    barge: 4,
};

pub const DEEP_CLIMB_POINTS: u32 = 12;
pub const SHALLOW_CLIMB_POINTS: u32 = 6;
pub const PARK_POINTS: u32 = 2;

impl PhaseWeights {
    // Dropped pieces never score and never penalize.
    pub fn score(&self, counters: &PhaseCounters) -> u32 {
        counters.level1 * self.level1
            + counters.level2 * self.level2
            + counters.level3 * self.level3
            + counters.level4 * self.level4
            + counters.processor * self.processor
            + counters.barge * self.barge
    }
}

pub fn score_auto(counters: &PhaseCounters) -> u32 {
    AUTO_WEIGHTS.score(counters)
}

pub fn score_teleop(counters: &PhaseCounters) -> u32 {
    TELEOP_WEIGHTS.score(counters)
}

pub fn score_endgame(decoded: &EndgameDecoded) -> u32 {
    match decoded.action {
        EndgameOutcome::Climb if decoded.climb_successful => match decoded.climb_depth {
            Some(ClimbDepth::Deep) => DEEP_CLIMB_POINTS,
            // Unknown depth is scored as a shallow climb.
            _ => SHALLOW_CLIMB_POINTS,
        },
        EndgameOutcome::Climb if decoded.climb_parked => PARK_POINTS,
        EndgameOutcome::Climb => 0,
        EndgameOutcome::Park => PARK_POINTS,
        EndgameOutcome::DidNotParkOrClimb => 0,
    }
}

pub fn score_breakdown(
    auto: &PhaseCounters,
    teleop: &PhaseCounters,
    endgame: &EndgameDecoded,
) -> ScoreBreakdown {
    let auto_score = score_auto(auto);
    let teleop_score = score_teleop(teleop);
    let endgame_score = score_endgame(endgame);

    ScoreBreakdown {
        auto_score,
        teleop_score,
        endgame_score,
        total_score: auto_score + teleop_score + endgame_score,
    }
}
