//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` holds a validated `start < end` interval and knows how to
//! resolve the command-line range selection into one.

use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Whether this port closes a batch of `limit` probes.
    #[inline]
    pub const fn is_multiple_of(self, limit: usize) -> bool {
        limit != 0 && (self.0 as usize) % limit == 0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port range parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("invalid port range format, use: start-end")]
    Format,
    #[error("invalid port number: {0}")]
    Parse(String),
    #[error("{0}")]
    Range(&'static str),
}

/// An inclusive port interval with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Every TCP port.
    pub const ALL: Self = Self {
        start: Port(1),
        end: Port(Port::MAX),
    };

    /// The well-known port block.
    pub const COMMON: Self = Self {
        start: Port(1),
        end: Port(1024),
    };

    /// Validate raw bounds in the order the range rules are checked.
    pub fn from_bounds(start: i64, end: i64) -> Result<Self, PortError> {
        if start < i64::from(Port::MIN) {
            return Err(PortError::Range("start port must be ≥ 1"));
        }
        if end <= start {
            return Err(PortError::Range("end port must exceed start port"));
        }
        if end > i64::from(Port::MAX) {
            return Err(PortError::Range("end port must be ≤ 65535"));
        }

        // Both bounds were checked against 1..=65535 above.
        Ok(Self {
            start: Port(start as u16),
            end: Port(end as u16),
        })
    }

    /// Resolve the range selection flags.
    ///
    /// `all` wins over `common`, which wins over the explicit `range`. The
    /// explicit range is only parsed when neither mode flag is set.
    pub fn select(all: bool, common: bool, range: &str) -> Result<Self, PortError> {
        if all {
            Ok(Self::ALL)
        } else if common {
            Ok(Self::COMMON)
        } else {
            range.parse()
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Number of ports in the interval.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// Always false; a valid range holds at least two ports.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bounds: Vec<&str> = s.split('-').collect();
        if bounds.len() != 2 {
            return Err(PortError::Format);
        }

        let start: i64 = bounds[0]
            .parse()
            .map_err(|_| PortError::Parse(bounds[0].to_string()))?;
        let end: i64 = bounds[1]
            .parse()
            .map_err(|_| PortError::Parse(bounds[1].to_string()))?;

        Self::from_bounds(start, end)
    }
}
