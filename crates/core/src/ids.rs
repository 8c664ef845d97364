//! Identifier newtypes shared across the coordinator.
//!
//! Plan, node, signal and segment identifiers are all allocated upstream
//! (by the trigger, by cluster membership, by the metadata store); the
//! coordinator never mints them itself, so these are plain integer wrappers
//! rather than a `IdGen`-backed type.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! int_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

int_id!(PlanId);
int_id!(NodeId);
int_id!(SegmentId);

/// Grouping tag shared by plans produced from the same trigger event.
///
/// `0` is the sentinel meaning "no signal" / "match every signal", per
/// `bySignal(0)` returning the union over all signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignalId(pub i64);

impl SignalId {
    pub const NONE: SignalId = SignalId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SignalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A logical data stream owned by exactly one worker at a time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelName(pub String);

impl ChannelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ChannelName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
