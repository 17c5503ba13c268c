//! Deterministic fingerprints for documents and payloads
//!
//! Fingerprints decide whether a cached render is still valid, so they must
//! be identical across process restarts. `std::hash` gives no such
//! guarantee; blake3 does.

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Every variable-length input is length-prefixed, so `("ab", "c")` and
/// `("a", "bc")` hash differently.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with a length-prefixed byte string
    #[inline]
    pub fn update_bytes(mut self, data: &[u8]) -> Self {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data);
        self
    }

    /// Update with a string
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update_bytes(s.as_bytes())
    }

    /// Update with a single tag byte (variant discriminants)
    #[inline]
    pub fn update_tag(mut self, tag: u8) -> Self {
        self.inner.update(&[tag]);
        self
    }

    /// Update with a u64 value (little-endian)
    #[inline]
    pub fn update_u64(mut self, v: u64) -> Self {
        self.inner.update(&v.to_le_bytes());
        self
    }

    /// Update with a usize value (widened to u64)
    #[inline]
    pub fn update_usize(self, v: usize) -> Self {
        self.update_u64(v as u64)
    }

    /// Finish and return the first 8 bytes of the digest as little-endian u64
    #[inline]
    pub fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Fingerprint
// =============================================================================

/// Types that can feed themselves into a [`StableHasher`].
///
/// Embedded payload types implement this to make documents carrying them
/// cacheable.
pub trait Fingerprint {
    /// Feed `self` into `hasher`
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher;

    /// Standalone fingerprint of `self`
    fn fingerprint(&self) -> u64 {
        self.fingerprint_into(StableHasher::new()).finish()
    }
}

impl Fingerprint for str {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        hasher.update_str(self)
    }
}

impl Fingerprint for String {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        hasher.update_str(self)
    }
}

impl Fingerprint for Vec<u8> {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        hasher.update_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = StableHasher::new().update_str("img").update_u64(7).finish();
        let b = StableHasher::new().update_str("img").update_u64(7).finish();
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_prefix_separates_inputs() {
        let a = StableHasher::new().update_str("ab").update_str("c").finish();
        let b = StableHasher::new().update_str("a").update_str("bc").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_string_and_str_agree() {
        assert_eq!("<b>raw</b>".fingerprint(), String::from("<b>raw</b>").fingerprint());
        // Same bytes, same fingerprint: payload variants add their own tag
        assert_eq!("<b>raw</b>".fingerprint(), b"<b>raw</b>".to_vec().fingerprint());
    }
}
