use std::collections::HashSet;
use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::model::{ValidationCounts, ValidationReport};
use crate::sheet::{COLUMN_COUNT, parse_row};
use crate::summary::{AUTO_NO_MOVE, TELEOP_NO_MOVE, counter_patterns_present};
use crate::util::{now_utc_string, read_json, sha256_file, utc_compact_string, write_json_pretty};

pub fn run(args: ValidateArgs) -> Result<()> {
    let source_sha256 = sha256_file(&args.rows)?;
    let rows: Vec<Vec<String>> = read_json(&args.rows)?;

    let mut counts = ValidationCounts {
        rows_total: rows.len(),
        ..ValidationCounts::default()
    };
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for (index, cells) in rows.iter().enumerate() {
        let Some(row) = parse_row(cells) else {
            counts.structural_rows += 1;
            continue;
        };

        counts.data_rows += 1;

        if cells.len() < COLUMN_COUNT {
            counts.short_rows += 1;
            warnings.push(format!(
                "row {index}: only {} of {COLUMN_COUNT} cells",
                cells.len()
            ));
            continue;
        }

        if !auto_summary_recognized(&row.auto_summary) {
            counts.unrecognized_auto_summaries += 1;
            warnings.push(format!(
                "row {index}: auto summary decodes to defaults: {:?}",
                row.auto_summary
            ));
        }

        if !teleop_summary_recognized(&row.teleop_summary) {
            counts.unrecognized_teleop_summaries += 1;
            warnings.push(format!(
                "row {index}: teleop summary decodes to defaults: {:?}",
                row.teleop_summary
            ));
        }

        if !endgame_summary_recognized(&row.endgame_summary) {
            counts.unrecognized_endgame_summaries += 1;
            warnings.push(format!(
                "row {index}: endgame summary decodes to defaults: {:?}",
                row.endgame_summary
            ));
        }

        for (label, cell) in [
            ("offense", &row.offense_rating),
            ("defense", &row.defense_rating),
        ] {
            if !rating_recognized(cell) {
                counts.invalid_rating_cells += 1;
                warnings.push(format!("row {index}: invalid {label} rating: {cell:?}"));
            }
        }

        if !matches!(row.partial_match.trim(), "Yes" | "No" | "") {
            counts.invalid_partial_cells += 1;
            warnings.push(format!(
                "row {index}: invalid partial-match cell: {:?}",
                row.partial_match
            ));
        }

        let key = (
            row.team.clone(),
            row.match_number.clone(),
            row.scouter.clone(),
        );
        if !seen.insert(key) {
            counts.duplicate_entries += 1;
            warnings.push(format!(
                "row {index}: duplicate entry for team {} match {} by {}",
                row.team, row.match_number, row.scouter
            ));
        }
    }

    let report = ValidationReport {
        report_version: 1,
        report_id: format!("validate-{}", utc_compact_string(Utc::now())),
        generated_at: now_utc_string(),
        source_path: args.rows.display().to_string(),
        source_sha256,
        counts,
        warnings,
    };

    for warning in &report.warnings {
        warn!(warning = %warning, "data-quality issue");
    }

    info!(
        rows_total = report.counts.rows_total,
        data_rows = report.counts.data_rows,
        structural_rows = report.counts.structural_rows,
        warnings = report.warnings.len(),
        "validation completed"
    );

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote validation report");
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &report)
        .context("failed to serialize validation report")?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

fn auto_summary_recognized(summary: &str) -> bool {
    summary.contains(AUTO_NO_MOVE)
        || summary.contains("Only moved forward")
        || counter_patterns_present(summary)
}

fn teleop_summary_recognized(summary: &str) -> bool {
    summary.contains(TELEOP_NO_MOVE) || counter_patterns_present(summary)
}

fn endgame_summary_recognized(summary: &str) -> bool {
    let lowered = summary.to_lowercase();
    ["did not park", "park", "climb", "none"]
        .iter()
        .any(|token| lowered.contains(token))
}

fn rating_recognized(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed == "-" || trimmed.parse::<u32>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_auto_encoder_output() {
        assert!(auto_summary_recognized("Didn't move in auto"));
        assert!(auto_summary_recognized(
            "Only moved forward (no scoring), Dropped:2"
        ));
        assert!(auto_summary_recognized(
            "L1:0, L2:0, L3:0, L4:0, P:0, B:0, Dropped:0"
        ));
        assert!(!auto_summary_recognized("robot sat still"));
        assert!(!auto_summary_recognized(""));
    }

    #[test]
    fn recognizes_every_endgame_encoder_output() {
        assert!(endgame_summary_recognized("Deep climb - Success"));
        assert!(endgame_summary_recognized("Park"));
        assert!(endgame_summary_recognized("Did Not Park/Climb"));
        assert!(endgame_summary_recognized("None"));
        assert!(!endgame_summary_recognized("tipped over"));
    }

    #[test]
    fn ratings_accept_dash_blank_and_integers() {
        assert!(rating_recognized("-"));
        assert!(rating_recognized(""));
        assert!(rating_recognized("4"));
        assert!(!rating_recognized("great"));
        assert!(!rating_recognized("-2"));
    }
}
