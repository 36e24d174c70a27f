//! Capacity limits for the scanner input and both pools.
//!
//! Every limit is checked up front and surfaces as a typed error
//! ([`ScanError::InputTooLong`](super::scanner::ScanError) or [`PoolExhausted`]).

use std::fmt;
use thiserror::Error;

/// Default maximum input length in bytes
pub const DEFAULT_MAX_INPUT_LEN: usize = 256;

/// Default number of token slots in a scan table: one token per input byte
/// plus the end-of-text marker
pub const DEFAULT_SCAN_CAPACITY: usize = DEFAULT_MAX_INPUT_LEN + 1;

/// Default number of node slots in a parse table. An expression of `n`
/// bytes never needs more than `n` nodes.
pub const DEFAULT_PARSE_CAPACITY: usize = 256;

/// Limits applied to one scan/parse session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_input_len: usize,
    pub scan_capacity: usize,
    pub parse_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            scan_capacity: DEFAULT_SCAN_CAPACITY,
            parse_capacity: DEFAULT_PARSE_CAPACITY,
        }
    }
}

impl Limits {
    pub fn with_max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = len;
        self
    }

    pub fn with_scan_capacity(mut self, capacity: usize) -> Self {
        self.scan_capacity = capacity;
        self
    }

    pub fn with_parse_capacity(mut self, capacity: usize) -> Self {
        self.parse_capacity = capacity;
        self
    }
}

/// Which fixed-capacity pool ran out of room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    ScanTable,
    ParseTable,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::ScanTable => f.write_str("scan table"),
            Pool::ParseTable => f.write_str("parse table"),
        }
    }
}

/// Allocation past a pool's capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{pool} exhausted: all {capacity} slots in use")]
pub struct PoolExhausted {
    pub pool: Pool,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pools_fit_longest_input() {
        let limits = Limits::default();
        // Every byte can be its own token, followed by end-of-text
        assert!(limits.scan_capacity > limits.max_input_len);
        assert!(limits.parse_capacity >= limits.max_input_len);
    }
}
