//! Log line assembly with an explicit capacity contract

use crate::decoder::{MAX_FIELD_LEN, MAX_UNIT_LEN};
use crate::error::{KwLogError, Result};
use std::fmt::Write;

/// Longest possible `<sec>.<cs>;` stamp (u64 seconds)
const MAX_STAMP_LEN: usize = 20 + 1 + 2 + 1;

/// Leading column of the units header line
pub const UNITS_PREFIX: &str = "s;";

/// Fields written for a no-acknowledgment response
pub const NO_ACK_FIELDS: &str = "n/a;n/a;n/a;n/a;";

/// Growable text line that refuses to exceed `max_len` bytes, newline included
#[derive(Debug, Clone)]
pub struct LineBuffer {
    text: String,
    max_len: usize,
}

impl LineBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::with_capacity(max_len.min(1024)),
            max_len,
        }
    }

    pub fn push_str(&mut self, s: &str) -> Result<()> {
        let needed = self.text.len() + s.len();
        if needed > self.max_len {
            return Err(KwLogError::capacity(format!(
                "Line needs {} bytes, limit is {}",
                needed, self.max_len
            )));
        }
        self.text.push_str(s);
        Ok(())
    }

    /// Terminate the line and hand out its text
    pub fn finish(&mut self) -> Result<&str> {
        self.push_str("\n")?;
        Ok(&self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Column header: `time;` then `<group> <n>;` for n in 1..=4 per group
pub fn header_line(groups: &[u8]) -> String {
    let mut out = String::from("time;");
    for g in groups {
        for n in 1..=4 {
            let _ = write!(out, "{} {};", g, n);
        }
    }
    out.push('\n');
    out
}

/// Bytes needed by the longest line a session over `groups` can produce
pub fn worst_case_line_length(groups: &[u8]) -> usize {
    let header = header_line(groups).len();
    let units = UNITS_PREFIX.len() + groups.len() * 4 * (MAX_UNIT_LEN + 1) + 1;
    let data = MAX_STAMP_LEN + groups.len() * 4 * (MAX_FIELD_LEN + 1) + 1;
    header.max(units).max(data)
}
