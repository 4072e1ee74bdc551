//! Build an environment by name.

use thiserror::Error;

use crate::calendar::CalendarEnv;
use crate::contract::Environment;
use crate::graph::GraphEnv;
use crate::multistart::MultiStartEnv;
use crate::trap::TrapEnv;

/// Errors from environment construction.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("unknown environment '{0}' (expected toy, trap, calendar, or multistart)")]
    UnknownEnv(String),
}

/// Construct a boxed environment from its name.
///
/// `seed` only matters for environments with randomized behavior
/// (currently `multistart`); the rest ignore it.
pub fn env_by_name(
    name: &str,
    max_depth: usize,
    seed: u64,
) -> Result<Box<dyn Environment>, FactoryError> {
    log::debug!("Building environment '{}' (depth limit {})", name, max_depth);
    match name.trim().to_ascii_lowercase().as_str() {
        "toy" => Ok(Box::new(GraphEnv::toy(max_depth))),
        "trap" | "hard" => Ok(Box::new(TrapEnv::new(max_depth))),
        "calendar" | "complex" => Ok(Box::new(CalendarEnv::new(max_depth))),
        "multistart" | "multi-start" => Ok(Box::new(MultiStartEnv::new(max_depth, seed))),
        other => Err(FactoryError::UnknownEnv(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        for name in ["toy", "trap", "hard", "calendar", "complex", "multistart"] {
            assert!(env_by_name(name, 10, 0).is_ok(), "{name} should resolve");
        }
    }

    #[test]
    fn test_name_normalization() {
        assert!(env_by_name("  Toy ", 10, 0).is_ok());
        assert!(env_by_name("TRAP", 10, 0).is_ok());
    }

    #[test]
    fn test_unknown_name() {
        let err = match env_by_name("warehouse", 10, 0) {
            Ok(_) => panic!("expected an error for unknown environment"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("warehouse"));
    }

    #[test]
    fn test_action_counts() {
        assert_eq!(env_by_name("toy", 10, 0).unwrap().action_count(), 2);
        assert_eq!(env_by_name("calendar", 10, 0).unwrap().action_count(), 33);
    }
}
