use std::collections::BTreeSet;

use crate::core::key::SignatureKey;

/// Request keys proven to have no conversion. Append-only.
#[derive(Debug, Clone, Default)]
pub(crate) struct UnsolvableSet(BTreeSet<SignatureKey>);

impl UnsolvableSet {
	/// Returns false if the key was already present.
	pub(crate) fn insert(&mut self, key: SignatureKey) -> bool {
		self.0.insert(key)
	}

	pub(crate) fn contains(&self, key: &str) -> bool {
		self.0.contains(key)
	}

	pub(crate) fn keys(&self) -> impl Iterator<Item = &SignatureKey> {
		self.0.iter()
	}
}
