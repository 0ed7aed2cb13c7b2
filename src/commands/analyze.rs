use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::team_stats;
use crate::cli::AnalyzeArgs;
use crate::model::{AnalysisReport, DecodedMatch, EndgameOutcome, PerformanceLevel, TeamAnalysis};
use crate::sheet::{decode_row, parse_row, team_sort_key};
use crate::util::{now_utc_string, read_json};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let rows: Vec<Vec<String>> = read_json(&args.rows)?;

    let mut decoded = rows
        .iter()
        .filter_map(|cells| parse_row(cells))
        .map(|row| decode_row(&row))
        .collect::<Vec<DecodedMatch>>();

    if args.hide_partial {
        decoded.retain(|observed| !observed.partial_match);
    }

    if let Some(team) = &args.team {
        decoded.retain(|observed| &observed.team == team);
    }

    let mut by_team: HashMap<String, Vec<DecodedMatch>> = HashMap::new();
    for observed in decoded {
        by_team.entry(observed.team.clone()).or_default().push(observed);
    }

    let mut team_numbers = by_team.keys().cloned().collect::<Vec<String>>();
    team_numbers.sort_by_key(|team| team_sort_key(team));

    let mut teams = Vec::with_capacity(team_numbers.len());
    for team in team_numbers {
        let mut matches = by_team.remove(&team).unwrap_or_default();
        matches.sort_by_key(|observed| match_number_key(&observed.match_number));

        teams.push(TeamAnalysis {
            team,
            stats: team_stats(&matches),
            matches,
        });
    }

    let report = AnalysisReport {
        generated_at: now_utc_string(),
        source_path: args.rows.display().to_string(),
        hide_partial: args.hide_partial,
        team_count: teams.len(),
        teams,
    };

    info!(
        rows = rows.len(),
        teams = report.team_count,
        path = %args.rows.display(),
        "analyzed rows dump"
    );

    if args.json {
        let mut output = io::BufWriter::new(io::stdout().lock());
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize analysis report")?;
        writeln!(output)?;
        output.flush()?;
        return Ok(());
    }

    write_text_report(&report, args.team.as_deref())
}

fn match_number_key(cell: &str) -> u64 {
    cell.trim().parse().unwrap_or(0)
}

fn write_text_report(report: &AnalysisReport, requested_team: Option<&str>) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    if report.teams.is_empty() {
        match requested_team {
            Some(team) => writeln!(output, "No data found for team {team}")?,
            None => writeln!(output, "No scouting data found")?,
        }
        output.flush()?;
        return Ok(());
    }

    for analysis in &report.teams {
        let stats = &analysis.stats;

        writeln!(
            output,
            "Team {} ({} performer)",
            analysis.team,
            match stats.performance_level {
                PerformanceLevel::High => "high",
                PerformanceLevel::Medium => "medium",
                PerformanceLevel::Low => "low",
            }
        )?;
        writeln!(
            output,
            "\tmatches={} shutdowns={} avg={:.1} best={} worst={} consistency={:.1}",
            stats.total_matches,
            stats.partial_matches,
            stats.avg_score,
            stats.max_score,
            stats.min_score,
            stats.consistency,
        )?;
        writeln!(
            output,
            "\tavg auto={:.1} avg teleop={:.1} offense={:.1}/5 defense={:.1}/5",
            stats.avg_auto, stats.avg_teleop, stats.avg_offense, stats.avg_defense,
        )?;
        writeln!(
            output,
            "\tclimbs={}/{} ({:.0}%) parks={} no endgame={}",
            stats.successful_climbs,
            stats.climb_attempts,
            stats.climb_rate,
            stats.park_count,
            stats.no_endgame_count,
        )?;
        writeln!(
            output,
            "\tavg pieces L1={:.1} L2={:.1} L3={:.1} L4={:.1} P={:.1} B={:.1} dropped={:.1}",
            stats.avg_level1,
            stats.avg_level2,
            stats.avg_level3,
            stats.avg_level4,
            stats.avg_processor,
            stats.avg_barge,
            stats.avg_dropped,
        )?;

        for observed in &analysis.matches {
            writeln!(
                output,
                "\tmatch {}\tauto={} teleop={} endgame={} total={}\t{}{}",
                observed.match_number,
                observed.scores.auto_score,
                observed.scores.teleop_score,
                observed.scores.endgame_score,
                observed.scores.total_score,
                endgame_label(observed),
                if observed.partial_match {
                    " [shutdown]"
                } else {
                    ""
                }
            )?;
        }
    }

    output.flush()?;
    Ok(())
}

fn endgame_label(observed: &DecodedMatch) -> &'static str {
    match observed.endgame.action {
        EndgameOutcome::Climb if observed.endgame.climb_successful => "climb",
        EndgameOutcome::Climb => "failed climb",
        EndgameOutcome::Park => "park",
        EndgameOutcome::DidNotParkOrClimb => "none",
    }
}
