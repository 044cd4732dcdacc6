//! Wildcard-capable byte patterns

use crate::core::types::{MemoryError, MemoryResult};
use std::fmt;

/// An immutable sequence of byte matchers, each an exact byte or a wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<Option<u8>>,
}

impl Pattern {
    /// Builds a pattern that matches the given bytes exactly
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Pattern {
            bytes: bytes.iter().map(|&b| Some(b)).collect(),
        }
    }

    /// Parses a hex pattern such as `"48 8B ?? ?? 89"`, where `??` (or `?`)
    /// marks a wildcard position
    pub fn from_hex(pattern: &str) -> MemoryResult<Self> {
        let parts: Vec<&str> = pattern.split_whitespace().collect();

        if parts.is_empty() {
            return Err(MemoryError::InvalidPattern("empty pattern".to_string()));
        }

        let mut bytes = Vec::with_capacity(parts.len());
        for part in parts {
            if part == "??" || part == "?" {
                bytes.push(None);
            } else {
                if part.len() != 2 {
                    return Err(MemoryError::InvalidPattern(format!(
                        "invalid hex byte '{}': must be 2 digits",
                        part
                    )));
                }
                let byte = u8::from_str_radix(part, 16).map_err(|_| {
                    MemoryError::InvalidPattern(format!("invalid hex: {}", part))
                })?;
                bytes.push(Some(byte));
            }
        }

        Ok(Pattern { bytes })
    }

    /// Number of byte positions in the pattern
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the pattern matches at the start of `window`.
    ///
    /// `window` must be at least `len()` bytes.
    fn matches_at(&self, window: &[u8]) -> bool {
        self.bytes
            .iter()
            .zip(window)
            .all(|(matcher, byte)| match matcher {
                Some(expected) => expected == byte,
                None => true,
            })
    }

    /// Offsets of every non-overlapping occurrence within `haystack`
    pub fn find_all(&self, haystack: &[u8]) -> Vec<usize> {
        let mut found = Vec::new();
        let len = self.len();
        if len == 0 || haystack.len() < len {
            return found;
        }

        let mut offset = 0;
        while offset + len <= haystack.len() {
            if self.matches_at(&haystack[offset..offset + len]) {
                found.push(offset);
                offset += len;
            } else {
                offset += 1;
            }
        }

        found
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match byte {
                Some(b) => write!(f, "{:02X}", b)?,
                None => f.write_str("??")?,
            }
        }
        Ok(())
    }
}
