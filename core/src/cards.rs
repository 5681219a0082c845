//! Statically compiled roster and preset data from /cards/roster.json and /cards/presets.json.
//! Generated at build time by build.rs — no runtime JSON parsing needed.
//! This module is always available (no_std compatible via alloc).

include!(concat!(env!("OUT_DIR"), "/roster_generated.rs"));
