//! Asset handles
//!
//! A handle is the sole cross-reference key between the registry, the
//! loaded-asset caches and the thumbnail cache. Handles are 64-bit,
//! minted randomly; `0` is the invalid sentinel.

use serde::{Deserialize, Serialize};

/// Unique identifier for an asset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(pub u64);

impl AssetHandle {
    /// The invalid/unset sentinel
    pub const INVALID: AssetHandle = AssetHandle(0);

    /// Create a handle from a raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Mint a random non-zero handle
    ///
    /// Callers are responsible for collision checks against their
    /// registry; re-mint on collision.
    pub fn random() -> Self {
        loop {
            let id: u64 = rand::random();
            if id != 0 {
                return Self(id);
            }
        }
    }

    /// Check if this handle refers to an asset
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// Raw value
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
