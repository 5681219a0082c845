//! Logging utilities
//!
//! Small helpers over the `log` facade so call sites stay one-liners.
//! Nothing is printed unless the host installs a logger.

const TARGET: &str = "rerollbar";

/// Log an info message
#[inline]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{msg}");
}

/// Log a warning message
#[inline]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{msg}");
}

/// Log a debug message with a label
#[inline]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{label}] {msg}");
}

/// Log game state summary
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn state_summary(
    gold: u32,
    level: u8,
    xp: u32,
    xp_required: u32,
    bench_count: usize,
    board_count: usize,
    spent: u32,
    rerolls: u32,
) {
    ::log::debug!(
        target: TARGET,
        "gold={gold} level={level} xp={xp}/{xp_required} bench={bench_count} board={board_count} spent={spent} rerolls={rerolls}"
    );
}

/// Log an action being performed
#[inline]
pub fn action(name: &str, details: &str) {
    ::log::debug!(target: TARGET, "> {name} {details}");
}

/// Log action result
#[inline]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::debug!(target: TARGET, "  ok: {msg}");
    } else {
        ::log::info!(target: TARGET, "  rejected: {msg}");
    }
}
