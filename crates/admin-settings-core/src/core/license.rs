// crates/admin-settings-core/src/core/license.rs
// ============================================================================
// Module: License Flags
// Description: Named license feature switches consulted by the resolver.
// Purpose: Pass license state explicitly instead of reading ambient globals.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! License flags are a plain `name -> bool` map. A flag that was never set is
//! treated as `false`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Named license feature flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseFlags(BTreeMap<String, bool>);

impl LicenseFlags {
    /// Creates an empty flag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the flag set with `name` set to `enabled`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, enabled);
        self
    }

    /// Sets a flag.
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    /// Returns whether `name` is enabled. Missing flags are disabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Iterates flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }
}

impl FromIterator<(String, bool)> for LicenseFlags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, bool>> for LicenseFlags {
    fn from(value: BTreeMap<String, bool>) -> Self {
        Self(value)
    }
}
