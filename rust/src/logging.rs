//! Logging macros for graph algorithms with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT (nothing)
//! - 1: RESULTS (schedule totals, walk costs, detected cycles)
//! - 2: STEPS (per-vertex processing, relaxations)
//! - 3: DEBUG (full algorithm internals, matrix dumps)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_RESULTS: u8 = 1;
pub const VERBOSITY_STEPS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at RESULTS level (verbosity >= 1).
///
/// Used for: algorithm outcomes and rejected inputs.
#[macro_export]
macro_rules! log_results {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_RESULTS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at STEPS level (verbosity >= 2).
///
/// Used for: vertices popped from a worklist, per-vertex schedule values.
#[macro_export]
macro_rules! log_steps {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STEPS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: matrices and other bulky internals.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counted(calls: &Cell<u32>, value: &'static str) -> &'static str {
        calls.set(calls.get() + 1);
        value
    }

    #[test]
    fn test_debug_arguments_skipped_below_debug() {
        let calls = Cell::new(0);
        log_debug!(VERBOSITY_STEPS, "  a: [{}]", counted(&calls, "0, inf"));
        assert_eq!(calls.get(), 0);

        log_debug!(VERBOSITY_DEBUG, "  a: [{}]", counted(&calls, "0, inf"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_each_macro_gated_at_its_own_level() {
        let calls = Cell::new(0);
        log_results!(VERBOSITY_SILENT, "total project time {}", counted(&calls, "5"));
        log_steps!(VERBOSITY_RESULTS, "  A: ES={}", counted(&calls, "0"));
        assert_eq!(calls.get(), 0);

        log_results!(VERBOSITY_RESULTS, "total project time {}", counted(&calls, "5"));
        log_steps!(VERBOSITY_STEPS, "  A: ES={}", counted(&calls, "0"));
        assert_eq!(calls.get(), 2);
    }
}
