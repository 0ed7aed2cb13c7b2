use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounters {
    #[serde(default, alias = "ll1")]
    pub level1: u32,
    #[serde(default, alias = "l2")]
    pub level2: u32,
    #[serde(default, alias = "l3")]
    pub level3: u32,
    #[serde(default, alias = "l4")]
    pub level4: u32,
    #[serde(default)]
    pub processor: u32,
    #[serde(default)]
    pub barge: u32,
    #[serde(default)]
    pub dropped_pieces: u32,
}

impl PhaseCounters {
    pub fn scored_pieces(&self) -> u32 {
        self.level1 + self.level2 + self.level3 + self.level4 + self.processor + self.barge
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutoInput {
    #[serde(flatten)]
    pub counters: PhaseCounters,
    #[serde(default)]
    pub no_move: bool,
    #[serde(default)]
    pub only_moved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeleopInput {
    #[serde(flatten)]
    pub counters: PhaseCounters,
    #[serde(default)]
    pub no_move: bool,
    #[serde(default)]
    pub offense_rating: Value,
    #[serde(default)]
    pub defense_rating: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndgameInput {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub climb_depth: String,
    #[serde(default)]
    pub climb_successful: bool,
    #[serde(default)]
    pub parked_on_fail: bool,
}

impl EndgameInput {
    // Free-form selector strings collapse to the closed action set here,
    // never inside the summary codec.
    pub fn to_action(&self) -> EndgameAction {
        match self.action.trim().to_lowercase().as_str() {
            "climb" => EndgameAction::Climb {
                depth: match self.climb_depth.trim().to_lowercase().as_str() {
                    "shallow" => ClimbDepth::Shallow,
                    "deep" => ClimbDepth::Deep,
                    _ => ClimbDepth::Unknown,
                },
                successful: self.climb_successful,
                parked_on_fail: self.parked_on_fail,
            },
            "park" => EndgameAction::Park,
            "did not park/climb" => EndgameAction::DidNotParkOrClimb,
            _ => EndgameAction::NoAction,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchObservation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(
        default,
        rename = "match",
        alias = "match_number",
        deserialize_with = "lenient_string"
    )]
    pub match_number: String,
    #[serde(default)]
    pub auto: AutoInput,
    #[serde(default)]
    pub teleop: TeleopInput,
    #[serde(default)]
    pub endgame: EndgameInput,
    #[serde(default)]
    pub partial_match: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimbDepth {
    Shallow,
    Deep,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndgameAction {
    NoAction,
    Park,
    Climb {
        depth: ClimbDepth,
        successful: bool,
        parked_on_fail: bool,
    },
    DidNotParkOrClimb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndgameOutcome {
    Climb,
    Park,
    #[default]
    DidNotParkOrClimb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EndgameDecoded {
    pub action: EndgameOutcome,
    pub climb_depth: Option<ClimbDepth>,
    pub climb_successful: bool,
    pub climb_parked: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub auto_score: u32,
    pub teleop_score: u32,
    pub endgame_score: u32,
    pub total_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoutedRow {
    pub scouter: String,
    pub team: String,
    pub match_number: String,
    pub timestamp: String,
    pub auto_summary: String,
    pub teleop_summary: String,
    pub offense_rating: String,
    pub defense_rating: String,
    pub endgame_summary: String,
    pub partial_match: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecodedMatch {
    pub scouter: String,
    pub team: String,
    pub match_number: String,
    pub auto: PhaseCounters,
    pub teleop: PhaseCounters,
    pub offense_rating: Option<u32>,
    pub defense_rating: Option<u32>,
    pub endgame: EndgameDecoded,
    pub partial_match: bool,
    pub notes: String,
    pub scores: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub auto_summary: String,
    pub teleop_summary: String,
    pub endgame_summary: String,
    pub auto: PhaseCounters,
    pub teleop: PhaseCounters,
    pub endgame: EndgameDecoded,
    pub scores: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamStats {
    pub total_matches: usize,
    pub partial_matches: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub min_score: u32,
    pub avg_auto: f64,
    pub avg_teleop: f64,
    pub avg_offense: f64,
    pub avg_defense: f64,
    pub climb_attempts: usize,
    pub successful_climbs: usize,
    pub failed_climbs: usize,
    pub climb_rate: f64,
    pub park_count: usize,
    pub no_endgame_count: usize,
    pub total_level1: u32,
    pub total_level2: u32,
    pub total_level3: u32,
    pub total_level4: u32,
    pub total_processor: u32,
    pub total_barge: u32,
    pub total_dropped: u32,
    pub avg_level1: f64,
    pub avg_level2: f64,
    pub avg_level3: f64,
    pub avg_level4: f64,
    pub avg_processor: f64,
    pub avg_barge: f64,
    pub avg_dropped: f64,
    pub consistency: f64,
    pub performance_level: PerformanceLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamAnalysis {
    pub team: String,
    pub stats: TeamStats,
    pub matches: Vec<DecodedMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub source_path: String,
    pub hide_partial: bool,
    pub team_count: usize,
    pub teams: Vec<TeamAnalysis>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationCounts {
    pub rows_total: usize,
    pub data_rows: usize,
    pub structural_rows: usize,
    pub short_rows: usize,
    pub unrecognized_auto_summaries: usize,
    pub unrecognized_teleop_summaries: usize,
    pub unrecognized_endgame_summaries: usize,
    pub invalid_rating_cells: usize,
    pub invalid_partial_cells: usize,
    pub duplicate_entries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub report_version: u32,
    pub report_id: String,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub counts: ValidationCounts,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    Red,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchPrediction {
    pub red_epa: f64,
    pub blue_epa: f64,
    pub red_win_prob: f64,
    pub blue_win_prob: f64,
    pub predicted_winner: Alliance,
    pub confidence: Confidence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_parses_the_original_form_payload() {
        let payload = serde_json::json!({
            "name": "  Avery ",
            "team": 254,
            "match": "12",
            "auto": {
                "ll1": 2,
                "l2": 1,
                "l4": 1,
                "processor": 1,
                "dropped_pieces": 1,
                "no_move": false,
                "only_moved": false
            },
            "teleop": {
                "ll1": 4,
                "l2": 2,
                "barge": 1,
                "offense_rating": "4",
                "defense_rating": "-",
                "no_move": false,
                "dropped_pieces": 0
            },
            "endgame": {
                "action": "climb",
                "climb_depth": "deep",
                "climb_successful": true
            },
            "notes": "fast cycles",
            "partial_match": false
        });

        let observation: MatchObservation = serde_json::from_value(payload).unwrap();

        assert_eq!(observation.name, "Avery");
        assert_eq!(observation.team, "254");
        assert_eq!(observation.match_number, "12");
        assert_eq!(observation.auto.counters.level1, 2);
        assert_eq!(observation.auto.counters.level4, 1);
        assert_eq!(observation.auto.counters.dropped_pieces, 1);
        assert_eq!(observation.teleop.counters.barge, 1);
        assert_eq!(observation.teleop.offense_rating, Value::String("4".to_string()));
        assert!(!observation.partial_match);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let observation: MatchObservation = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(observation.team, "");
        assert_eq!(observation.auto.counters, PhaseCounters::default());
        assert!(!observation.teleop.no_move);
        assert_eq!(observation.endgame.to_action(), EndgameAction::NoAction);
    }

    #[test]
    fn endgame_selector_strings_map_to_the_closed_set() {
        let climb = EndgameInput {
            action: " Climb ".to_string(),
            climb_depth: "SHALLOW".to_string(),
            climb_successful: false,
            parked_on_fail: true,
        };
        assert_eq!(
            climb.to_action(),
            EndgameAction::Climb {
                depth: ClimbDepth::Shallow,
                successful: false,
                parked_on_fail: true,
            }
        );

        let park = EndgameInput {
            action: "park".to_string(),
            ..EndgameInput::default()
        };
        assert_eq!(park.to_action(), EndgameAction::Park);

        let neither = EndgameInput {
            action: "did not park/climb".to_string(),
            ..EndgameInput::default()
        };
        assert_eq!(neither.to_action(), EndgameAction::DidNotParkOrClimb);

        let unknown = EndgameInput {
            action: "flew away".to_string(),
            ..EndgameInput::default()
        };
        assert_eq!(unknown.to_action(), EndgameAction::NoAction);
    }
}
