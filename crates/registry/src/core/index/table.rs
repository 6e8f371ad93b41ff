use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::entry::ConverterEntry;
use crate::core::error::RegistryError;
use crate::core::key::SignatureKey;

/// A stored entry and whether a synthetic chain has used it.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
	pub(crate) entry: Arc<ConverterEntry>,
	pub(crate) used: bool,
}

/// Converter table guarded by the registry's table lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
	by_key: FxHashMap<SignatureKey, Slot>,
	order: BTreeSet<SignatureKey>,
	by_name: FxHashMap<String, SignatureKey>,
}

impl Table {
	pub(crate) fn get(&self, key: &str) -> Option<&Slot> {
		self.by_key.get(key)
	}

	pub(crate) fn get_named(&self, name: &str) -> Option<&Slot> {
		self.by_name.get(name).and_then(|key| self.by_key.get(key))
	}

	pub(crate) fn len(&self) -> usize {
		self.by_key.len()
	}

	/// Keys in sorted order.
	pub(crate) fn keys(&self) -> impl Iterator<Item = &SignatureKey> {
		self.order.iter()
	}

	/// Slots in key order.
	pub(crate) fn iter(&self) -> impl Iterator<Item = (&SignatureKey, &Slot)> {
		self.order.iter().filter_map(|key| self.by_key.get(key).map(|slot| (key, slot)))
	}

	/// Validates a batch against the table and against itself.
	pub(crate) fn check(&self, batch: &[(SignatureKey, ConverterEntry)]) -> Result<(), RegistryError> {
		let mut keys: FxHashMap<&str, String> = FxHashMap::default();
		let mut names: FxHashSet<&str> = FxHashSet::default();
		for (key, entry) in batch {
			let existing = self
				.by_key
				.get(key.as_str())
				.map(|slot| slot.entry.label())
				.or_else(|| keys.get(key.as_str()).cloned());
			if let Some(existing) = existing {
				return Err(RegistryError::Duplicate {
					key: key.clone(),
					existing,
					incoming: entry.label(),
				});
			}
			keys.insert(key.as_str(), entry.label());

			if let Some(name) = entry.name()
				&& (self.by_name.contains_key(name) || !names.insert(name))
			{
				return Err(RegistryError::DuplicateName { name: name.to_string() });
			}
		}
		Ok(())
	}

	/// Inserts without checking; callers run [`Table::check`] first.
	pub(crate) fn insert(&mut self, key: SignatureKey, entry: Arc<ConverterEntry>) {
		if let Some(name) = entry.name() {
			self.by_name.insert(name.to_string(), key.clone());
		}
		self.order.insert(key.clone());
		self.by_key.insert(key, Slot { entry, used: false });
	}

	pub(crate) fn mark_used(&mut self, key: &str) {
		if let Some(slot) = self.by_key.get_mut(key) {
			slot.used = true;
		}
	}

	/// Copy keeping every used slot and every slot not in `exclude`.
	pub(crate) fn filtered(&self, exclude: &FxHashSet<&str>) -> Table {
		if exclude.is_empty() {
			return self.clone();
		}
		let mut out = Table::default();
		for (key, slot) in self.iter() {
			if slot.used || !exclude.contains(key.as_str()) {
				if let Some(name) = slot.entry.name() {
					out.by_name.insert(name.to_string(), key.clone());
				}
				out.order.insert(key.clone());
				out.by_key.insert(key.clone(), slot.clone());
			}
		}
		out
	}
}
