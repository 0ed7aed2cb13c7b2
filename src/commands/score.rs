use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ScoreArgs;
use crate::model::{DecodedMatch, ScoreReport};
use crate::scoring::score_breakdown;
use crate::sheet::{decode_row, parse_row};
use crate::summary::{decode_auto_summary, decode_endgame_summary, decode_teleop_summary};
use crate::util::read_json;

pub fn run(args: ScoreArgs) -> Result<()> {
    if let Some(rows_path) = &args.rows {
        return score_rows(&args, rows_path);
    }

    if args.auto.is_none() && args.teleop.is_none() && args.endgame.is_none() {
        bail!("provide --rows or at least one of --auto, --teleop, --endgame");
    }

    let auto_summary = args.auto.clone().unwrap_or_default();
    let teleop_summary = args.teleop.clone().unwrap_or_default();
    let endgame_summary = args.endgame.clone().unwrap_or_default();

    let auto = decode_auto_summary(&auto_summary);
    let teleop = decode_teleop_summary(&teleop_summary);
    let endgame = decode_endgame_summary(&endgame_summary);
    let scores = score_breakdown(&auto, &teleop, &endgame);

    let report = ScoreReport {
        auto_summary,
        teleop_summary,
        endgame_summary,
        auto,
        teleop,
        endgame,
        scores,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &report)
            .context("failed to serialize score report")?;
        writeln!(output)?;
    } else {
        writeln!(
            output,
            "auto={} teleop={} endgame={} total={}",
            scores.auto_score, scores.teleop_score, scores.endgame_score, scores.total_score
        )?;
    }
    output.flush()?;

    Ok(())
}

fn score_rows(args: &ScoreArgs, rows_path: &Path) -> Result<()> {
    let rows: Vec<Vec<String>> = read_json(rows_path)?;

    let decoded = rows
        .iter()
        .filter_map(|cells| parse_row(cells))
        .map(|row| decode_row(&row))
        .collect::<Vec<DecodedMatch>>();

    info!(
        rows = rows.len(),
        scored = decoded.len(),
        path = %rows_path.display(),
        "scored rows dump"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &decoded)
            .context("failed to serialize scored rows")?;
        writeln!(output)?;
    } else {
        for observed in &decoded {
            writeln!(
                output,
                "team {}\tmatch {}\t{}\tauto={} teleop={} endgame={} total={}{}",
                observed.team,
                observed.match_number,
                observed.scouter,
                observed.scores.auto_score,
                observed.scores.teleop_score,
                observed.scores.endgame_score,
                observed.scores.total_score,
                if observed.partial_match {
                    "\t[shutdown]"
                } else {
                    ""
                }
            )?;
        }
    }
    output.flush()?;

    Ok(())
}
