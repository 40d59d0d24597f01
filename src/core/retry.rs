//! Bounded retry for rejection-sampling loops.
//!
//! The mulligan, random deck generation and mutation loops all "try until
//! it works". Each runs through `bounded`, which gives up after a fixed
//! number of attempts and says so instead of spinning forever.

/// Result of a bounded retry loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempt<T> {
    /// A step produced a value. `attempts` counts that successful step.
    Success { value: T, attempts: u32 },
    /// Every allowed step came back empty.
    Exhausted { attempts: u32 },
}

impl<T> Attempt<T> {
    /// Number of steps that ran.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Attempt::Success { attempts, .. } | Attempt::Exhausted { attempts } => *attempts,
        }
    }

    /// The value, if a step succeeded.
    pub fn into_value(self) -> Option<T> {
        match self {
            Attempt::Success { value, .. } => Some(value),
            Attempt::Exhausted { .. } => None,
        }
    }
}

/// Run `step` until it returns `Ok(Some(_))`, at most `limit` times.
///
/// `step` receives the 1-based attempt number. An `Err` aborts the loop
/// immediately and is passed through.
///
/// ```
/// use pocket_ccg::core::retry::{bounded, Attempt};
///
/// let found = bounded(10, |n| Ok::<_, ()>((n == 3).then_some(n * 2)));
/// assert_eq!(found, Ok(Attempt::Success { value: 6, attempts: 3 }));
///
/// let never = bounded(4, |_| Ok::<Option<u32>, ()>(None));
/// assert_eq!(never, Ok(Attempt::Exhausted { attempts: 4 }));
/// ```
pub fn bounded<T, E>(
    limit: u32,
    mut step: impl FnMut(u32) -> Result<Option<T>, E>,
) -> Result<Attempt<T>, E> {
    for attempt in 1..=limit {
        if let Some(value) = step(attempt)? {
            return Ok(Attempt::Success {
                value,
                attempts: attempt,
            });
        }
    }
    Ok(Attempt::Exhausted { attempts: limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_success_wins() {
        let mut calls = 0;
        let result = bounded(5, |n| {
            calls += 1;
            Ok::<_, ()>(if n >= 2 { Some("done") } else { None })
        });

        assert_eq!(
            result,
            Ok(Attempt::Success {
                value: "done",
                attempts: 2
            })
        );
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_error_stops_loop() {
        let mut calls = 0;
        let result: Result<Attempt<u32>, &str> = bounded(5, |_| {
            calls += 1;
            Err("boom")
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_limit_is_exhausted() {
        let result = bounded(0, |_| Ok::<_, ()>(Some(1)));
        assert_eq!(result, Ok(Attempt::Exhausted { attempts: 0 }));
        assert_eq!(result.map(|a| a.into_value()), Ok(None));
    }
}
