use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RebuildArgs;
use crate::model::MatchObservation;
use crate::sheet::{build_sheet_layout, observation_to_row};
use crate::util::{now_display_string, read_json, write_json_pretty};

pub fn run(args: RebuildArgs) -> Result<()> {
    let mut rows: Vec<Vec<String>> = read_json(&args.rows)?;

    if let Some(append_path) = &args.append {
        let observation: MatchObservation = read_json(append_path)?;
        rows.push(observation_to_row(&observation, &now_display_string()));
        info!(
            team = %observation.team,
            match_number = %observation.match_number,
            "appended new submission before regrouping"
        );
    }

    let team_names: HashMap<String, String> = match &args.team_names {
        Some(path) => read_json(path)?,
        None => HashMap::new(),
    };

    let layout = build_sheet_layout(&rows, &team_names);
    info!(
        input_rows = rows.len(),
        layout_rows = layout.len(),
        "rebuilt sheet layout"
    );

    if let Some(output_path) = &args.output {
        write_json_pretty(output_path, &layout)?;
        info!(path = %output_path.display(), "wrote sheet layout");
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &layout)
            .context("failed to serialize sheet layout")?;
        writeln!(output)?;
    } else {
        for cells in &layout {
            writeln!(output, "{}", cells.join("\t"))?;
        }
    }
    output.flush()?;

    Ok(())
}
