use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::EncodeArgs;
use crate::model::MatchObservation;
use crate::sheet::observation_to_row;
use crate::util::{now_display_string, read_json};

pub fn run(args: EncodeArgs) -> Result<()> {
    let observation: MatchObservation = read_json(&args.input)?;
    warn_discarded_counters(&observation);

    let row = observation_to_row(&observation, &now_display_string());

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &row)
            .context("failed to serialize encoded row")?;
        writeln!(output)?;
    } else {
        writeln!(output, "{}", row.join("\t"))?;
    }
    output.flush()?;

    info!(
        team = %observation.team,
        match_number = %observation.match_number,
        scouter = %observation.name,
        "encoded submission row"
    );

    Ok(())
}

// The no-move and only-moved flags win over any counters entered alongside
// them; the counters are not recoverable from the summary afterwards.
fn warn_discarded_counters(observation: &MatchObservation) {
    let auto = &observation.auto;
    if (auto.no_move || auto.only_moved) && auto.counters.scored_pieces() > 0 {
        warn!(
            team = %observation.team,
            match_number = %observation.match_number,
            scored_pieces = auto.counters.scored_pieces(),
            "auto movement flag discards nonzero scoring counters"
        );
    }

    let teleop = &observation.teleop;
    if teleop.no_move && teleop.counters.scored_pieces() > 0 {
        warn!(
            team = %observation.team,
            match_number = %observation.match_number,
            scored_pieces = teleop.counters.scored_pieces(),
            "teleop no-move flag discards nonzero scoring counters"
        );
    }
}
