//! Digests used for harness fingerprints.
//!
//! Values are hashed through their JSON encoding, so two structurally equal
//! values always digest the same.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// Order-insensitive combination of two digests.
    pub fn xor(self, other: Hash256) -> Hash256 {
        let mut out = self.0;
        for (byte, rhs) in out.iter_mut().zip(other.0) {
            *byte ^= rhs;
        }
        Hash256(out)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn hash_bytes(bytes: &[u8]) -> Hash256 {
    Hash256(*blake3::hash(bytes).as_bytes())
}

pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256> {
    let bytes = serde_json::to_vec(v)?;
    Ok(hash_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_order_insensitive_and_self_cancelling() {
        let a = hash_bytes(b"platforms");
        let b = hash_bytes(b"mappings");
        assert_eq!(a.xor(b), b.xor(a));
        assert_eq!(a.xor(a), Hash256([0; 32]));
    }

    #[test]
    fn serde_hash_follows_structure() {
        let x = hash_serde(&vec![(1u64, "map")]).unwrap();
        assert_eq!(x, hash_serde(&vec![(1u64, "map")]).unwrap());
        assert_ne!(x, hash_serde(&vec![(2u64, "map")]).unwrap());
        assert_eq!(x.to_hex().len(), 64);
        assert_eq!(x.to_string(), x.to_hex());
    }
}
