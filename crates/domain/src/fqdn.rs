use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully-qualified domain name in canonical form: lower-case ASCII with a
/// single trailing dot. Two names are equal iff their canonical forms are
/// byte-equal, so `Fqdn` values can be compared directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fqdn(String);

impl Fqdn {
    /// Canonicalize a name. Idempotent: canonicalizing an already-canonical
    /// name is a no-op.
    pub fn from_name(name: &str) -> Self {
        let mut canonical = name.to_ascii_lowercase();
        if !canonical.ends_with('.') {
            canonical.push('.');
        }
        Self(canonical)
    }

    /// The DNS root.
    pub fn root() -> Self {
        Self(".".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "."
    }

    /// Prepend a label, e.g. `"n1"` + `bootstrap.fabric.internal.` →
    /// `n1.bootstrap.fabric.internal.`.
    pub fn prepend_label(&self, label: &str) -> Result<Self, DomainError> {
        if label.is_empty() || label.contains('.') {
            return Err(DomainError::InvalidDomainName(label.to_string()));
        }
        if self.is_root() {
            return Ok(Self::from_name(label));
        }
        Ok(Self::from_name(&format!("{}.{}", label, self.0)))
    }

    /// Suffix match on label boundaries: `fabric.internal.` is a suffix of
    /// `n1.fabric.internal.` and of itself, but not of `notfabric.internal.`.
    pub fn is_suffix_of(&self, name: &Fqdn) -> bool {
        if self.is_root() {
            return true;
        }
        if name.0 == self.0 {
            return true;
        }
        name.0
            .strip_suffix(&self.0)
            .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Number of labels, used to rank suffix matches by specificity.
    pub fn label_count(&self) -> usize {
        if self.is_root() {
            return 0;
        }
        self.0.trim_end_matches('.').split('.').count()
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fqdn {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}
