//! Radix encoding of counter values.
//!
//! Digits are `0-9` then `a-z`. The encoder writes straight into an [`IdSink`]
//! and keeps a reusable scratch buffer, so producing an id never goes through
//! an intermediate `String`.

use crate::error::SectionIdError;

/// Smallest supported radix.
pub const MIN_RADIX: u32 = 2;
/// Largest supported radix, also the default.
pub const MAX_RADIX: u32 = 36;
/// Radix substituted for anything outside `MIN_RADIX..=MAX_RADIX`.
pub const FALLBACK_RADIX: u32 = 10;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const INITIAL_SCRATCH: usize = 15;

/// Append-only character sink that ids are written into.
pub trait IdSink {
    fn push_char(&mut self, c: char);
    fn push_str(&mut self, s: &str);
}

impl IdSink for String {
    #[inline]
    fn push_char(&mut self, c: char) {
        self.push(c);
    }

    #[inline]
    fn push_str(&mut self, s: &str) {
        String::push_str(self, s);
    }
}

impl IdSink for Vec<u8> {
    #[inline]
    fn push_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    #[inline]
    fn push_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }
}

/// Map an arbitrary radix onto the supported range.
#[inline]
pub fn normalize_radix(radix: u32) -> u32 {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        radix
    } else {
        FALLBACK_RADIX
    }
}

/// Reject a radix outside `MIN_RADIX..=MAX_RADIX` instead of normalizing it.
pub fn validate_radix(radix: u32) -> Result<u32, SectionIdError> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(radix)
    } else {
        Err(SectionIdError::InvalidRadix(radix))
    }
}

/// Encoder with a fixed radix and its own scratch buffer.
#[derive(Debug, Clone)]
pub struct RadixEncoder {
    radix: u32,
    scratch: Vec<u8>,
}

impl RadixEncoder {
    /// Create an encoder. The radix is kept as given and normalized on every
    /// encode call.
    pub fn new(radix: u32) -> Self {
        Self {
            radix,
            scratch: vec![0; INITIAL_SCRATCH],
        }
    }

    /// Radix as configured.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Radix actually used for encoding.
    pub fn effective_radix(&self) -> u32 {
        normalize_radix(self.radix)
    }

    /// Current scratch length.
    pub fn scratch_len(&self) -> usize {
        self.scratch.len()
    }

    /// Append the encoding of `value` to `sink`.
    pub fn encode_into<S: IdSink + ?Sized>(&mut self, value: i64, sink: &mut S) {
        let radix = i64::from(normalize_radix(self.radix));

        if value == 0 {
            sink.push_char('0');
            return;
        }

        let negative = value < 0;
        let mut count = if negative { 2 } else { 1 };
        let mut rest = value / radix;
        while rest != 0 {
            count += 1;
            rest /= radix;
        }

        if self.scratch.len() < count {
            log::debug!(
                "growing radix scratch from {} to {}",
                self.scratch.len(),
                count
            );
            self.scratch = vec![0; count];
        }

        // Work on the non-positive side so i64::MIN needs no special case.
        let mut j = if negative { value } else { -value };
        let mut pos = count;
        loop {
            let digit = (-(j % radix)) as usize;
            pos -= 1;
            self.scratch[pos] = DIGITS[digit];
            j /= radix;
            if j == 0 {
                break;
            }
        }
        if negative {
            self.scratch[0] = b'-';
        }

        for &b in &self.scratch[..count] {
            sink.push_char(char::from(b));
        }
    }
}

impl Default for RadixEncoder {
    fn default() -> Self {
        Self::new(MAX_RADIX)
    }
}

/// Encode `value` into a fresh string.
pub fn encode(value: i64, radix: u32) -> String {
    let mut out = String::new();
    RadixEncoder::new(radix).encode_into(value, &mut out);
    out
}

/// Decode a numeral produced by [`encode`]. Only lowercase digits and a
/// leading `-` are accepted.
pub fn decode(text: &str, radix: u32) -> Result<i64, SectionIdError> {
    let radix = normalize_radix(radix);
    let invalid = || SectionIdError::InvalidDigit {
        segment: text.to_string(),
        radix,
    };

    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty()
        || !digits
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    {
        return Err(invalid());
    }

    i64::from_str_radix(text, radix).map_err(|_| invalid())
}
