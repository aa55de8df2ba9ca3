//! Fixed-capacity text that truncates instead of overflowing.

use heapless::String;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A string holding at most `N` bytes.
///
/// Every write path truncates at a character boundary once the capacity is
/// reached, so `write!` into a `BoundedString` never fails and never grows
/// past `N`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundedString<const N: usize>(String<N>);

impl<const N: usize> BoundedString<N> {
    /// Create an empty string.
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Copy as much of `s` as fits.
    pub fn truncated(s: &str) -> Self {
        let mut out = Self::new();
        out.push_truncated(s);
        out
    }

    /// Append as much of `s` as fits. Returns `false` if anything was cut.
    pub fn push_truncated(&mut self, s: &str) -> bool {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                return false;
            }
        }
        true
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Write for BoundedString<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_truncated(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
