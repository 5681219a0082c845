//! Build script: reads /cards/roster.json and /cards/presets.json and generates
//! Rust source code that statically constructs the unit roster and deck presets.
//! This lets the core crate embed its catalog without any runtime JSON parsing,
//! keeping it fully no_std compatible.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;

// ── JSON schema types (build-time only) ──────────────────────────────────────

#[derive(Deserialize)]
struct JsonUnit {
    key: String,
    name: String,
    cost: u8,
    #[serde(default)]
    traits: Vec<String>,
}

#[derive(Deserialize)]
struct JsonPreset {
    name: String,
    members: Vec<String>,
    #[serde(default = "default_target_rank")]
    target_rank: u8,
    #[serde(default)]
    three_stars: Vec<String>,
}

fn default_target_rank() -> u8 {
    2
}

// ── Code generation helpers ──────────────────────────────────────────────────

fn gen_str_list(items: &[String]) -> String {
    if items.is_empty() {
        return "vec![]".to_string();
    }
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("String::from({s:?})"))
        .collect();
    format!("vec![{}]", quoted.join(", "))
}

fn gen_unit(unit: &JsonUnit) -> String {
    let key = &unit.key;
    let name = &unit.name;
    let cost = unit.cost;
    let traits = gen_str_list(&unit.traits);

    format!(
        r#"        UnitTemplate {{
            key: String::from({key:?}),
            name: String::from({name:?}),
            traits: {traits},
            cost: {cost},
        }}"#
    )
}

fn gen_preset(preset: &JsonPreset) -> String {
    let name = &preset.name;
    let members = gen_str_list(&preset.members);
    let three_stars = gen_str_list(&preset.three_stars);
    let rank = match preset.target_rank {
        1 => "Rank::One",
        2 => "Rank::Two",
        3 => "Rank::Three",
        other => panic!("Preset {name} has invalid target rank {other}"),
    };

    format!(
        r#"        DeckPreset {{
            name: String::from({name:?}),
            members: {members},
            target_rank: {rank},
            three_stars: {three_stars},
        }}"#
    )
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let roster_path = Path::new(&manifest_dir).join("../cards/roster.json");
    let presets_path = Path::new(&manifest_dir).join("../cards/presets.json");

    // Tell Cargo to re-run if JSON files change
    println!("cargo:rerun-if-changed={}", roster_path.display());
    println!("cargo:rerun-if-changed={}", presets_path.display());

    let roster_json = fs::read_to_string(&roster_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", roster_path.display()));
    let presets_json = fs::read_to_string(&presets_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", presets_path.display()));

    let roster: Vec<JsonUnit> =
        serde_json::from_str(&roster_json).expect("Failed to parse roster.json");
    let presets: Vec<JsonPreset> =
        serde_json::from_str(&presets_json).expect("Failed to parse presets.json");

    // ── Validate ─────────────────────────────────────────────────────────────
    let mut keys = BTreeSet::new();
    for unit in &roster {
        if !(1..=5).contains(&unit.cost) {
            panic!("Unit {} has cost {} outside 1..=5", unit.key, unit.cost);
        }
        if !keys.insert(unit.key.clone()) {
            panic!("Duplicate unit key {}", unit.key);
        }
    }
    for preset in &presets {
        for member in preset.members.iter().chain(preset.three_stars.iter()) {
            if !keys.contains(member) {
                panic!("Preset {} references unknown unit {member}", preset.name);
            }
        }
    }

    // ── Generate ─────────────────────────────────────────────────────────────
    let unit_entries: Vec<String> = roster.iter().map(gen_unit).collect();
    let preset_entries: Vec<String> = presets.iter().map(gen_preset).collect();

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("roster_generated.rs");

    let generated = format!(
        r#"// Auto-generated from roster.json and presets.json — DO NOT EDIT
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use crate::presets::DeckPreset;
use crate::types::{{Rank, UnitTemplate}};

/// Returns every unit defined in roster.json, ordered by cost tier.
pub fn roster_templates() -> Vec<UnitTemplate> {{
    vec![
{}
    ]
}}

/// Returns every deck preset defined in presets.json.
pub fn deck_presets() -> Vec<DeckPreset> {{
    vec![
{}
    ]
}}
"#,
        unit_entries.join(",\n"),
        preset_entries.join(",\n"),
    );

    fs::write(&dest, generated).expect("Failed to write generated roster file");
}
