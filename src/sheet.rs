use std::collections::HashMap;

use serde_json::Value;

use crate::model::{DecodedMatch, MatchObservation, ScoutedRow};
use crate::scoring::score_breakdown;
use crate::summary::{
    decode_auto_summary, decode_endgame_summary, decode_teleop_summary, encode_auto_summary,
    encode_endgame_summary, encode_teleop_summary,
};

pub const COLUMN_COUNT: usize = 11;

pub const HEADER: [&str; COLUMN_COUNT] = [
    "Scouter Name",
    "Team Number",
    "Match Number",
    "Submission Time",
    "Auto Summary",
    "Teleop Summary",
    "Offense Rating",
    "Defense Rating",
    "Endgame Summary",
    "Partial Match Shutdown?",
    "Notes",
];

pub fn observation_to_row(observation: &MatchObservation, submitted_at: &str) -> Vec<String> {
    let auto_summary = encode_auto_summary(
        &observation.auto.counters,
        observation.auto.no_move,
        observation.auto.only_moved,
    );
    let teleop_summary =
        encode_teleop_summary(&observation.teleop.counters, observation.teleop.no_move);
    let endgame_summary = encode_endgame_summary(&observation.endgame.to_action());

    vec![
        observation.name.clone(),
        observation.team.clone(),
        observation.match_number.clone(),
        submitted_at.to_string(),
        auto_summary,
        teleop_summary,
        clean_rating(&observation.teleop.offense_rating),
        clean_rating(&observation.teleop.defense_rating),
        endgame_summary,
        if observation.partial_match { "Yes" } else { "No" }.to_string(),
        observation.notes.clone(),
    ]
}

// Positive integers keep their value, zero and empty collapse to "-",
// anything else non-empty passes through untouched.
pub fn clean_rating(value: &Value) -> String {
    let numeric = match value {
        Value::Number(number) => number.as_i64(),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    if let Some(number) = numeric {
        return if number > 0 {
            number.to_string()
        } else {
            "-".to_string()
        };
    }

    match value {
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        _ => "-".to_string(),
    }
}

pub fn parse_rating(cell: &str) -> Option<u32> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    trimmed.parse().ok()
}

pub fn parse_row(cells: &[String]) -> Option<ScoutedRow> {
    if cells.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }

    let first = cells.first().map(String::as_str).unwrap_or("");
    if first.starts_with("Team ") || first == "Scouter Name" {
        return None;
    }

    let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();

    Some(ScoutedRow {
        scouter: cell(0),
        team: cell(1),
        match_number: cell(2),
        timestamp: cell(3),
        auto_summary: cell(4),
        teleop_summary: cell(5),
        offense_rating: cell(6),
        defense_rating: cell(7),
        endgame_summary: cell(8),
        partial_match: cell(9),
        notes: cell(10),
    })
}

pub fn decode_row(row: &ScoutedRow) -> DecodedMatch {
    let auto = decode_auto_summary(&row.auto_summary);
    let teleop = decode_teleop_summary(&row.teleop_summary);
    let endgame = decode_endgame_summary(&row.endgame_summary);
    let scores = score_breakdown(&auto, &teleop, &endgame);

    DecodedMatch {
        scouter: row.scouter.clone(),
        team: row.team.clone(),
        match_number: row.match_number.clone(),
        auto,
        teleop,
        offense_rating: parse_rating(&row.offense_rating),
        defense_rating: parse_rating(&row.defense_rating),
        endgame,
        partial_match: row.partial_match.trim() == "Yes",
        notes: row.notes.clone(),
        scores,
    }
}

pub fn build_sheet_layout(
    rows: &[Vec<String>],
    team_names: &HashMap<String, String>,
) -> Vec<Vec<String>> {
    let mut teams_data: HashMap<String, Vec<Vec<String>>> = HashMap::new();

    for cells in rows {
        if parse_row(cells).is_none() {
            continue;
        }

        let team = cells.get(1).cloned().unwrap_or_default();
        teams_data.entry(team).or_default().push(pad_row(cells));
    }

    let mut team_numbers = teams_data.keys().cloned().collect::<Vec<String>>();
    team_numbers.sort_by_key(|team| team_sort_key(team));

    let mut layout = Vec::new();

    for team in team_numbers {
        if !layout.is_empty() {
            layout.push(vec![String::new(); COLUMN_COUNT]);
        }

        let team_name = team_names
            .get(&team)
            .map(String::as_str)
            .unwrap_or("Unknown Team");

        let mut banner = vec![String::new(); COLUMN_COUNT];
        banner[0] = format!("Team {team}: {team_name}");
        layout.push(banner);
        layout.push(HEADER.iter().map(ToString::to_string).collect());

        let mut entries = teams_data.remove(&team).unwrap_or_default();
        entries.sort_by_key(|entry| match_sort_key(&entry[2]));
        layout.extend(entries);
    }

    layout
}

fn pad_row(cells: &[String]) -> Vec<String> {
    let mut padded = cells.to_vec();
    padded.resize(COLUMN_COUNT, String::new());
    padded
}

pub(crate) fn team_sort_key(team: &str) -> (u8, u64, String) {
    match team.trim().parse::<u64>() {
        Ok(number) => (0, number, String::new()),
        Err(_) => (1, 0, team.to_string()),
    }
}

// Non-numeric match cells sort first, matching the original rewrite.
fn match_sort_key(cell: &str) -> u64 {
    let trimmed = cell.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|character| character.is_ascii_digit()) {
        trimmed.parse().unwrap_or(0)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AutoInput, EndgameInput, PhaseCounters, TeleopInput};

    fn observation() -> MatchObservation {
        MatchObservation {
            name: "Avery".to_string(),
            team: "254".to_string(),
            match_number: "12".to_string(),
            auto: AutoInput {
                counters: PhaseCounters {
                    level1: 2,
                    level2: 1,
                    level4: 1,
                    processor: 1,
                    dropped_pieces: 1,
                    ..PhaseCounters::default()
                },
                no_move: false,
                only_moved: false,
            },
            teleop: TeleopInput {
                counters: PhaseCounters {
                    level1: 4,
                    level2: 2,
                    barge: 1,
                    ..PhaseCounters::default()
                },
                no_move: false,
                offense_rating: serde_json::json!(4),
                defense_rating: serde_json::json!(0),
            },
            endgame: EndgameInput {
                action: "climb".to_string(),
                climb_depth: "deep".to_string(),
                climb_successful: true,
                parked_on_fail: false,
            },
            partial_match: false,
            notes: "fast cycles".to_string(),
        }
    }

    #[test]
    fn observation_row_has_eleven_positional_cells() {
        let row = observation_to_row(&observation(), "04/05/2025 10:15:00 AM");

        assert_eq!(row.len(), COLUMN_COUNT);
        assert_eq!(row[0], "Avery");
        assert_eq!(row[1], "254");
        assert_eq!(row[2], "12");
        assert_eq!(row[4], "L1:2, L2:1, L3:0, L4:1, P:1, B:0, Dropped:1");
        assert_eq!(row[5], "L1:4, L2:2, L3:0, L4:0, P:0, B:1, Dropped:0");
        assert_eq!(row[6], "4");
        assert_eq!(row[7], "-");
        assert_eq!(row[8], "Deep climb - Success");
        assert_eq!(row[9], "No");
        assert_eq!(row[10], "fast cycles");
    }

    #[test]
    fn clean_rating_handles_loose_form_values() {
        assert_eq!(clean_rating(&serde_json::json!(3)), "3");
        assert_eq!(clean_rating(&serde_json::json!("5")), "5");
        assert_eq!(clean_rating(&serde_json::json!(0)), "-");
        assert_eq!(clean_rating(&serde_json::json!("")), "-");
        assert_eq!(clean_rating(&Value::Null), "-");
        assert_eq!(clean_rating(&serde_json::json!("N/A")), "N/A");
    }

    #[test]
    fn parse_row_skips_structural_rows() {
        let blank = vec![String::new(); COLUMN_COUNT];
        assert!(parse_row(&blank).is_none());
        assert!(parse_row(&[]).is_none());

        let banner = vec!["Team 254: The Cheesy Poofs".to_string()];
        assert!(parse_row(&banner).is_none());

        let header = HEADER
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();
        assert!(parse_row(&header).is_none());
    }

    #[test]
    fn parse_row_tolerates_short_rows() {
        let short = vec!["Avery".to_string(), "254".to_string()];
        let row = parse_row(&short).unwrap();
        assert_eq!(row.scouter, "Avery");
        assert_eq!(row.team, "254");
        assert_eq!(row.endgame_summary, "");
    }

    #[test]
    fn decode_row_round_trips_an_encoded_observation() {
        let observation = observation();
        let cells = observation_to_row(&observation, "04/05/2025 10:15:00 AM");
        let decoded = decode_row(&parse_row(&cells).unwrap());

        assert_eq!(decoded.auto, observation.auto.counters);
        assert_eq!(decoded.teleop, observation.teleop.counters);
        assert_eq!(decoded.offense_rating, Some(4));
        assert_eq!(decoded.defense_rating, None);
        assert!(!decoded.partial_match);
        assert_eq!(decoded.scores.auto_score, 23);
        assert_eq!(decoded.scores.teleop_score, 18);
        assert_eq!(decoded.scores.endgame_score, 12);
        assert_eq!(decoded.scores.total_score, 53);
    }

    fn data_row(scouter: &str, team: &str, match_number: &str) -> Vec<String> {
        let mut cells = vec![String::new(); COLUMN_COUNT];
        cells[0] = scouter.to_string();
        cells[1] = team.to_string();
        cells[2] = match_number.to_string();
        cells[4] = "L1:1, L2:0, L3:0, L4:0, P:0, B:0, Dropped:0".to_string();
        cells[8] = "None".to_string();
        cells[9] = "No".to_string();
        cells
    }

    #[test]
    fn layout_groups_by_team_and_sorts_matches() {
        let rows = vec![
            data_row("Avery", "1323", "9"),
            data_row("Sam", "254", "14"),
            data_row("Noah", "254", "3"),
        ];
        let mut names = HashMap::new();
        names.insert("254".to_string(), "The Cheesy Poofs".to_string());

        let layout = build_sheet_layout(&rows, &names);

        assert_eq!(layout[0][0], "Team 254: The Cheesy Poofs");
        assert_eq!(layout[1][0], "Scouter Name");
        assert_eq!(layout[2][0], "Noah");
        assert_eq!(layout[3][0], "Sam");
        assert!(layout[4].iter().all(String::is_empty));
        assert_eq!(layout[5][0], "Team 1323: Unknown Team");
        assert_eq!(layout[7][0], "Avery");
    }

    #[test]
    fn layout_drops_old_structural_rows_before_regrouping() {
        let rows = vec![
            vec!["Team 254: The Cheesy Poofs".to_string()],
            HEADER.iter().map(ToString::to_string).collect(),
            data_row("Sam", "254", "2"),
            vec![String::new(); COLUMN_COUNT],
            data_row("Avery", "254", "1"),
        ];

        let layout = build_sheet_layout(&rows, &HashMap::new());

        // one banner, one header, two data rows
        assert_eq!(layout.len(), 4);
        assert_eq!(layout[2][0], "Avery");
        assert_eq!(layout[3][0], "Sam");
    }
}
