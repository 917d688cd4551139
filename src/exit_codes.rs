//! Exit code constants for the devflow CLI.
//!
//! - 0: Success
//! - 1: Generic failure (missing tool, configure/compile failure, no action)
//!
//! Test runs, verification stages and `run` additionally propagate the
//! underlying tool's exit status verbatim (see `DevError::exit_code`).

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Generic failure: missing tool, build or configuration failure, no action.
pub const FAILURE: i32 = 1;

/// Clamp a tool's raw exit status into a value usable as our own exit code.
///
/// Statuses outside `1..=255` (signals, negative codes, success reported on a
/// failure path) collapse to [`FAILURE`].
pub fn verbatim(code: i32) -> i32 {
    if (1..=255).contains(&code) {
        code
    } else {
        FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(SUCCESS, FAILURE);
        assert_eq!(SUCCESS, 0);
        assert_eq!(FAILURE, 1);
    }

    #[test]
    fn verbatim_keeps_tool_codes_in_range() {
        assert_eq!(verbatim(8), 8);
        assert_eq!(verbatim(255), 255);
        assert_eq!(verbatim(1), 1);
    }

    #[test]
    fn verbatim_collapses_out_of_range_codes() {
        assert_eq!(verbatim(0), FAILURE);
        assert_eq!(verbatim(-1), FAILURE);
        assert_eq!(verbatim(256), FAILURE);
    }
}
