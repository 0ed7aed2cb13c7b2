use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::PredictArgs;
use crate::model::{Alliance, Confidence};
use crate::predict::predict_match;

pub fn run(args: PredictArgs) -> Result<()> {
    if args.red_epas.is_empty() || args.blue_epas.is_empty() {
        bail!("both --red-epa and --blue-epa need at least one value");
    }

    let prediction = predict_match(&args.red_epas, &args.blue_epas);

    info!(
        red_epa = prediction.red_epa,
        blue_epa = prediction.blue_epa,
        "predicted match outcome"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &prediction)
            .context("failed to serialize prediction")?;
        writeln!(output)?;
    } else {
        let winner = match prediction.predicted_winner {
            Alliance::Red => "red",
            Alliance::Blue => "blue",
        };
        let confidence = match prediction.confidence {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        writeln!(
            output,
            "red EPA {:.1} vs blue EPA {:.1}",
            prediction.red_epa, prediction.blue_epa
        )?;
        writeln!(
            output,
            "{} wins {:.1}% / {:.1}% ({} confidence)",
            winner,
            prediction.red_win_prob.max(prediction.blue_win_prob),
            prediction.red_win_prob.min(prediction.blue_win_prob),
            confidence
        )?;
    }
    output.flush()?;

    Ok(())
}
