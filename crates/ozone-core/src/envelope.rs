//! Repair of the feed's script wrapper.
//!
//! The publisher does not serve bare JSON: the station array is embedded in a
//! variable assignment, so the raw body carries a fixed number of non-JSON
//! characters before and after the array literal. Repair cuts them off by
//! offset. A wrapper of a different length is not detected here; it surfaces
//! as a JSON syntax error when the result is parsed.

use crate::AdvisoryError;

/// Characters of wrapper in front of the array.
pub const DEFAULT_PREFIX_LEN: usize = 14;
/// Characters of wrapper after the array.
pub const DEFAULT_SUFFIX_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeRepair {
    pub prefix_len: usize,
    pub suffix_len: usize,
}

impl Default for EnvelopeRepair {
    fn default() -> Self {
        Self {
            prefix_len: DEFAULT_PREFIX_LEN,
            suffix_len: DEFAULT_SUFFIX_LEN,
        }
    }
}

impl EnvelopeRepair {
    pub fn new(prefix_len: usize, suffix_len: usize) -> Self {
        Self {
            prefix_len,
            suffix_len,
        }
    }

    /// Strips the wrapper from `raw` and returns the enclosed text, trimmed.
    ///
    /// Offsets count characters, not bytes, and apply to the body exactly as
    /// received. Fails when nothing would be left between prefix and suffix.
    pub fn repair<'a>(&self, raw: &'a str) -> Result<&'a str, AdvisoryError> {
        let needed = self.prefix_len + self.suffix_len;
        let len = raw.chars().count();
        if len <= needed {
            return Err(AdvisoryError::EnvelopeTooShort { len, needed });
        }

        let start = byte_offset(raw, self.prefix_len);
        let end = byte_offset(raw, len - self.suffix_len);
        Ok(raw[start..end].trim())
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
