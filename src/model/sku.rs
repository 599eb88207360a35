//! SKU identifier: an opaque, cheaply-cloned string handle.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// A stock-keeping unit identifier, unique within one [`crate::chain::SupplyChain`].
///
/// Backed by `Arc<str>` so that cloning a SKU (which happens constantly:
/// every quantity-map key, every edge endpoint) is a refcount bump rather
/// than a string allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sku(Arc<str>);

impl Sku {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Sku(Arc::from(s))
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Sku(Arc::from(s.as_str()))
    }
}

impl From<&Sku> for Sku {
    fn from(s: &Sku) -> Self {
        s.clone()
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Sku {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
