//! Shared test utilities for the WSR-88D decoder workspace.
//!
//! - Big-endian builders for Level II messages, Level III products and
//!   archive/product files
//! - Fixture constants shared by the builders and the assertions
//! - Lookup of optional real radar files
//!
//! ```ignore
//! use test_utils::{require_test_file, GenericRadial, moment_block};
//! ```

pub mod builders;
pub mod fixtures;
pub mod paths;

pub use builders::*;
pub use fixtures::*;
pub use paths::*;

/// Returns the path of a real data file, or skips the calling test.
///
/// Real Level II archives and Level III products are not checked in.
///
/// ```ignore
/// let path = require_test_file!(files::LEVEL2_ARCHIVE);
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: radar file '{}' not found. Set WSR88D_TEST_DATA or add it to testdata/.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Asserts two numbers are within `epsilon` of each other.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "values differ: {:?} vs {:?} (diff {:?} > {:?})",
                left, right, diff, epsilon
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_within_epsilon() {
        assert_approx_eq!(0.5f32, 0.4999, 0.001);
        assert_approx_eq!(-32.0, -32.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "values differ")]
    fn test_assert_approx_eq_outside_epsilon() {
        assert_approx_eq!(94.5, 94.0, 0.25);
    }
}
