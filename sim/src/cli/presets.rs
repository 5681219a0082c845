//! Presets command implementation.

use rerollbar_core::cards::deck_presets;
use rerollbar_core::Catalog;
use serde::Serialize;

use super::{CliError, OutputFormat};

#[derive(Debug, Serialize)]
struct PresetRow {
    name: String,
    members: Vec<String>,
    three_stars: Vec<String>,
    max_cost: u8,
}

/// Execute the presets command.
pub(crate) fn execute(format: OutputFormat) -> Result<(), CliError> {
    let catalog = Catalog::standard();
    let rows: Vec<PresetRow> = deck_presets()
        .into_iter()
        .map(|p| PresetRow {
            max_cost: p
                .members
                .iter()
                .filter_map(|k| catalog.get(k))
                .map(|t| t.cost)
                .max()
                .unwrap_or(0),
            name: p.name,
            members: p.members,
            three_stars: p.three_stars,
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            for row in &rows {
                let stars = if row.three_stars.is_empty() {
                    String::new()
                } else {
                    format!("  (3*: {})", row.three_stars.join(", "))
                };
                println!("{:<28} up to {}g  {}{stars}", row.name, row.max_cost, row.members.join(", "));
            }
        }
    }
    Ok(())
}
