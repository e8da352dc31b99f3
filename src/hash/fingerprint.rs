//! 256-bit position fingerprint and its text forms

use std::fmt;
use std::ops::{BitXor, BitXorAssign};
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Bytes in a fingerprint
pub const FINGERPRINT_BYTES: usize = 32;

/// Fixed-width digest of a board, usable as a map key or a file name.
///
/// Text forms are lower-case hex (64 chars, also used by `Display`, `FromStr`
/// and serde) and URL-safe base64 without padding (43 chars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fingerprint([u64; 4]);

impl Fingerprint {
    pub const ZERO: Fingerprint = Fingerprint([0; 4]);

    #[inline]
    pub const fn from_words(words: [u64; 4]) -> Self {
        Self(words)
    }

    #[inline]
    pub fn words(&self) -> [u64; 4] {
        self.0
    }

    /// Big-endian bytes, most significant word first
    pub fn to_bytes(&self) -> [u8; FINGERPRINT_BYTES] {
        let mut out = [0u8; FINGERPRINT_BYTES];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        if bytes.len() != FINGERPRINT_BYTES {
            return Err(EngineError::InvalidFingerprint(format!(
                "expected {FINGERPRINT_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_be_bytes(buf);
        }
        Ok(Self(words))
    }

    /// 64 lower-case hex digits
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// 43 characters of URL-safe, unpadded base64
    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_bytes())
    }

    pub fn from_base64(text: &str) -> Result<Self, EngineError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(text)
            .map_err(|e| EngineError::InvalidFingerprint(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0 {
            write!(f, "{word:016x}")?;
        }
        Ok(())
    }
}

impl FromStr for Fingerprint {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if s.len() != FINGERPRINT_BYTES * 2 || !canonical {
            return Err(EngineError::InvalidFingerprint(format!(
                "expected 64 lower-case hex digits, got {:?}",
                s
            )));
        }
        let mut words = [0u64; 4];
        for (i, word) in words.iter_mut().enumerate() {
            let digits = &s[i * 16..(i + 1) * 16];
            *word = u64::from_str_radix(digits, 16)
                .map_err(|e| EngineError::InvalidFingerprint(e.to_string()))?;
        }
        Ok(Self(words))
    }
}

impl BitXor for Fingerprint {
    type Output = Fingerprint;

    #[inline]
    fn bitxor(self, rhs: Fingerprint) -> Fingerprint {
        let mut out = self;
        out ^= rhs;
        out
    }
}

impl BitXorAssign for Fingerprint {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Fingerprint) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a ^= b;
        }
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
