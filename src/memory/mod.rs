//! Memory structure

pub mod cache;

use std::fmt;
use std::str::FromStr;

pub use cache::Cache;
pub use cache::CacheConfig;
pub use cache::CacheHistory;
pub use cache::Line;

/// Reference: <https://inst.eecs.berkeley.edu/~cs61c/su20/pdfs/lectures/lec15.pdf>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteHitPolicy {
    #[default]
    WriteThrough,
    WriteBack,
}

impl fmt::Display for WriteHitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteHitPolicy::WriteBack => f.write_str("write-back"),
            WriteHitPolicy::WriteThrough => f.write_str("write-through"),
        }
    }
}

impl FromStr for WriteHitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wb" | "write-back" => Ok(WriteHitPolicy::WriteBack),
            "wt" | "write-through" => Ok(WriteHitPolicy::WriteThrough),
            _ => Err(format!(
                "Invalid write hit policy: '{}'. Expected 'wb' or 'wt'.",
                s
            )),
        }
    }
}

/// Reference: <https://inst.eecs.berkeley.edu/~cs61c/su20/pdfs/lectures/lec15.pdf>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteMissPolicy {
    WriteAllocate,
    #[default]
    WriteNoAllocate,
}

impl fmt::Display for WriteMissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMissPolicy::WriteAllocate => f.write_str("write-allocate"),
            WriteMissPolicy::WriteNoAllocate => {
                f.write_str("no-write-allocate")
            }
        }
    }
}

impl FromStr for WriteMissPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wa" | "write-allocate" => Ok(WriteMissPolicy::WriteAllocate),
            "nwa" | "no-write-allocate" => Ok(WriteMissPolicy::WriteNoAllocate),
            _ => Err(format!(
                "Invalid write miss policy: '{}'. Expected 'wa' or 'nwa'.",
                s
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    Read,
    Write,
}

/// Outcome of a single access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit,
    Miss,
}

impl AccessOutcome {
    pub fn is_hit(self) -> bool {
        self == AccessOutcome::Hit
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOutcome::Hit => f.write_str("HIT"),
            AccessOutcome::Miss => f.write_str("MISS"),
        }
    }
}
