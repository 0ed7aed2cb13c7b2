use crate::model::{DecodedMatch, EndgameOutcome, PerformanceLevel, TeamStats};

const HIGH_PERFORMER_AVG: f64 = 60.0;
const MEDIUM_PERFORMER_AVG: f64 = 40.0;

pub fn team_stats(matches: &[DecodedMatch]) -> TeamStats {
    let total_matches = matches.len();
    let divisor = total_matches.max(1) as f64;

    let partial_matches = matches
        .iter()
        .filter(|observed| observed.partial_match)
        .count();

    let scores = matches
        .iter()
        .map(|observed| observed.scores.total_score)
        .collect::<Vec<u32>>();
    let score_sum = scores.iter().map(|score| u64::from(*score)).sum::<u64>();
    let avg_score = score_sum as f64 / divisor;
    let max_score = scores.iter().copied().max().unwrap_or(0);
    let min_score = scores.iter().copied().min().unwrap_or(0);

    let avg_auto = matches
        .iter()
        .map(|observed| f64::from(observed.scores.auto_score))
        .sum::<f64>()
        / divisor;
    let avg_teleop = matches
        .iter()
        .map(|observed| f64::from(observed.scores.teleop_score))
        .sum::<f64>()
        / divisor;

    // Unrated cells count as zero, like the original dashboard.
    let avg_offense = matches
        .iter()
        .map(|observed| f64::from(observed.offense_rating.unwrap_or(0)))
        .sum::<f64>()
        / divisor;
    let avg_defense = matches
        .iter()
        .map(|observed| f64::from(observed.defense_rating.unwrap_or(0)))
        .sum::<f64>()
        / divisor;

    let climb_attempts = matches
        .iter()
        .filter(|observed| observed.endgame.action == EndgameOutcome::Climb)
        .count();
    let successful_climbs = matches
        .iter()
        .filter(|observed| {
            observed.endgame.action == EndgameOutcome::Climb && observed.endgame.climb_successful
        })
        .count();
    let failed_climbs = climb_attempts - successful_climbs;
    let climb_rate = if climb_attempts > 0 {
        successful_climbs as f64 * 100.0 / climb_attempts as f64
    } else {
        0.0
    };

    let park_count = matches
        .iter()
        .filter(|observed| observed.endgame.action == EndgameOutcome::Park)
        .count();
    let no_endgame_count = matches
        .iter()
        .filter(|observed| observed.endgame.action == EndgameOutcome::DidNotParkOrClimb)
        .count();

    let mut total_level1 = 0;
    let mut total_level2 = 0;
    let mut total_level3 = 0;
    let mut total_level4 = 0;
    let mut total_processor = 0;
    let mut total_barge = 0;
    let mut total_dropped = 0;

    for observed in matches {
        for counters in [&observed.auto, &observed.teleop] {
            total_level1 += counters.level1;
            total_level2 += counters.level2;
            total_level3 += counters.level3;
            total_level4 += counters.level4;
            total_processor += counters.processor;
            total_barge += counters.barge;
            total_dropped += counters.dropped_pieces;
        }
    }

    let variance = scores
        .iter()
        .map(|score| {
            let delta = f64::from(*score) - avg_score;
            delta * delta
        })
        .sum::<f64>()
        / divisor;
    let consistency = variance.sqrt();

    let performance_level = if avg_score >= HIGH_PERFORMER_AVG {
        PerformanceLevel::High
    } else if avg_score >= MEDIUM_PERFORMER_AVG {
        PerformanceLevel::Medium
    } else {
        PerformanceLevel::Low
    };

    TeamStats {
        total_matches,
        partial_matches,
        avg_score,
        max_score,
        min_score,
        avg_auto,
        avg_teleop,
        avg_offense,
        avg_defense,
        climb_attempts,
        successful_climbs,
        failed_climbs,
        climb_rate,
        park_count,
        no_endgame_count,
        total_level1,
        total_level2,
        total_level3,
        total_level4,
        total_processor,
        total_barge,
        total_dropped,
        avg_level1: f64::from(total_level1) / divisor,
        avg_level2: f64::from(total_level2) / divisor,
        avg_level3: f64::from(total_level3) / divisor,
        avg_level4: f64::from(total_level4) / divisor,
        avg_processor: f64::from(total_processor) / divisor,
        avg_barge: f64::from(total_barge) / divisor,
        avg_dropped: f64::from(total_dropped) / divisor,
        consistency,
        performance_level,
    }
}
