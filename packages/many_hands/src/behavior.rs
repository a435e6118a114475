use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Identifies the coordination pattern that a run exercises.
///
/// Each behavior has a canonical name which is also the string form accepted on
/// the command line: `counter`, `counters` and `queue`. Names are matched
/// case-sensitively.
///
/// # Examples
///
/// ```
/// use many_hands::Behavior;
///
/// let behavior: Behavior = "counters".parse().unwrap();
/// assert_eq!(behavior, Behavior::ShardedCounters);
/// assert_eq!(behavior.to_string(), "counters");
///
/// assert!("bogus".parse::<Behavior>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Behavior {
    /// All workers increment one shared counter, serialized by a mutex.
    SingleCounter,

    /// Each worker increments randomly chosen counters from a padded table
    /// of atomics, so workers rarely contend for the same cache line.
    ShardedCounters,

    /// One producer feeds a lock-guarded queue that all other workers drain.
    Queue,
}

impl FromStr for Behavior {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(Self::SingleCounter),
            "counters" => Ok(Self::ShardedCounters),
            "queue" => Ok(Self::Queue),
            _ => Err(Error::UnknownBehavior {
                requested: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SingleCounter => "counter",
            Self::ShardedCounters => "counters",
            Self::Queue => "queue",
        };

        f.write_str(name)
    }
}
