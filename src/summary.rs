use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ClimbDepth, EndgameAction, EndgameDecoded, EndgameOutcome, PhaseCounters};

pub const AUTO_NO_MOVE: &str = "Didn't move in auto";
pub const TELEOP_NO_MOVE: &str = "Didn't move in teleop";
pub const ONLY_MOVED_PREFIX: &str = "Only moved forward (no scoring)";

static LEVEL1_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"L1:(\d+)").expect("valid pattern"));
static LEVEL2_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"L2:(\d+)").expect("valid pattern"));
static LEVEL3_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"L3:(\d+)").expect("valid pattern"));
static LEVEL4_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"L4:(\d+)").expect("valid pattern"));
static PROCESSOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"P:(\d+)").expect("valid pattern"));
static BARGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"B:(\d+)").expect("valid pattern"));
static DROPPED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Dropped:(\d+)").expect("valid pattern"));

pub fn encode_auto_summary(counters: &PhaseCounters, no_move: bool, only_moved: bool) -> String {
    if no_move {
        return AUTO_NO_MOVE.to_string();
    }

    if only_moved {
        return format!("{ONLY_MOVED_PREFIX}, Dropped:{}", counters.dropped_pieces);
    }

    counter_line(counters)
}

pub fn encode_teleop_summary(counters: &PhaseCounters, no_move: bool) -> String {
    if no_move {
        return TELEOP_NO_MOVE.to_string();
    }

    counter_line(counters)
}

pub fn encode_endgame_summary(action: &EndgameAction) -> String {
    match action {
        EndgameAction::Climb {
            depth,
            successful,
            parked_on_fail,
        } => {
            let climb_type = match depth {
                ClimbDepth::Shallow => "Shallow climb",
                ClimbDepth::Deep => "Deep climb",
                ClimbDepth::Unknown => "Climb",
            };

            if *successful {
                format!("{climb_type} - Success")
            } else if *parked_on_fail {
                format!("{climb_type} - Failed but Parked")
            } else {
                format!("{climb_type} - Failed")
            }
        }
        EndgameAction::Park => "Park".to_string(),
        EndgameAction::DidNotParkOrClimb => "Did Not Park/Climb".to_string(),
        EndgameAction::NoAction => "None".to_string(),
    }
}

fn counter_line(counters: &PhaseCounters) -> String {
    format!(
        "L1:{}, L2:{}, L3:{}, L4:{}, P:{}, B:{}, Dropped:{}",
        counters.level1,
        counters.level2,
        counters.level3,
        counters.level4,
        counters.processor,
        counters.barge,
        counters.dropped_pieces
    )
}

pub fn decode_auto_summary(summary: &str) -> PhaseCounters {
    if summary.contains(AUTO_NO_MOVE) {
        return PhaseCounters::default();
    }

    if summary.contains("Only moved forward") {
        return PhaseCounters {
            dropped_pieces: extract_count(&DROPPED_PATTERN, summary),
            ..PhaseCounters::default()
        };
    }

    extract_counters(summary)
}

pub fn decode_teleop_summary(summary: &str) -> PhaseCounters {
    if summary.contains(TELEOP_NO_MOVE) {
        return PhaseCounters::default();
    }

    extract_counters(summary)
}

// Substring rules are checked in order; "Did Not Park/Climb" must win
// before the bare "park"/"climb" probes see it.
pub fn decode_endgame_summary(summary: &str) -> EndgameDecoded {
    let lowered = summary.to_lowercase();

    if lowered.contains("did not park/climb") || lowered.contains("did not park") {
        return EndgameDecoded::default();
    }

    if lowered.contains("park") && !lowered.contains("climb") {
        return EndgameDecoded {
            action: EndgameOutcome::Park,
            ..EndgameDecoded::default()
        };
    }

    if lowered.contains("climb") {
        let climb_depth = if lowered.contains("shallow") {
            ClimbDepth::Shallow
        } else if lowered.contains("deep") {
            ClimbDepth::Deep
        } else {
            ClimbDepth::Unknown
        };

        return EndgameDecoded {
            action: EndgameOutcome::Climb,
            climb_depth: Some(climb_depth),
            climb_successful: lowered.contains("success"),
            climb_parked: lowered.contains("parked"),
        };
    }

    EndgameDecoded::default()
}

pub fn counter_patterns_present(summary: &str) -> bool {
    LEVEL1_PATTERN.is_match(summary)
        || LEVEL2_PATTERN.is_match(summary)
        || LEVEL3_PATTERN.is_match(summary)
        || LEVEL4_PATTERN.is_match(summary)
        || PROCESSOR_PATTERN.is_match(summary)
        || BARGE_PATTERN.is_match(summary)
        || DROPPED_PATTERN.is_match(summary)
}

fn extract_counters(summary: &str) -> PhaseCounters {
    PhaseCounters {
        level1: extract_count(&LEVEL1_PATTERN, summary),
        level2: extract_count(&LEVEL2_PATTERN, summary),
        level3: extract_count(&LEVEL3_PATTERN, summary),
        level4: extract_count(&LEVEL4_PATTERN, summary),
        processor: extract_count(&PROCESSOR_PATTERN, summary),
        barge: extract_count(&BARGE_PATTERN, summary),
        dropped_pieces: extract_count(&DROPPED_PATTERN, summary),
    }
}

fn extract_count(pattern: &Regex, summary: &str) -> u32 {
    pattern
        .captures(summary)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
        .unwrap_or(0)
}
