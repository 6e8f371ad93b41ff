//! Request resolution: exact lookup, negative cache, composition search.
//!
//! # Role
//!
//! Turns a `(target, argument tags)` request into a stored entry. Misses run a
//! depth-bounded search over a fork of the registry; the result is memoized
//! either as a synthetic entry or as an unsolvable key.
//!
//! # Invariants
//!
//! - A request key with an entry never triggers a search.
//! - A request key in the unsolvable cache never triggers a search.
//! - A chain never leaves caller arguments unconsumed and never reorders them.

use std::sync::Arc;

use morph_primitives::TypeTag;

use crate::core::entry::ConverterEntry;
use crate::core::index::Registry;
use crate::core::key::SignatureKey;

mod walk;

use walk::ChainSearch;

impl Registry {
	/// Finds or synthesizes the entry converting `args` into `target`.
	pub fn resolve(&self, target: TypeTag, args: &[TypeTag]) -> Option<Arc<ConverterEntry>> {
		let key = SignatureKey::for_target(target, args);
		if let Some(entry) = self.get(key.as_str()) {
			self.stats_ref().exact_hit();
			tracing::trace!(%key, synthetic = entry.is_synthetic(), "exact converter hit");
			return Some(entry);
		}
		if self.is_unsolvable(key.as_str()) {
			self.stats_ref().unsolvable_hit();
			tracing::debug!(%key, "request known unsolvable");
			return None;
		}

		let fork = self.fork(&[]);
		self.stats_ref().search();
		tracing::debug!(%key, candidates = fork.len(), "searching for converter chain");
		let chain = ChainSearch::new(target, fork.entries(), self.search_config()).run(args);

		match chain {
			Some(chain) => Some(self.insert_synthetic(key, args, target, chain)),
			None => {
				tracing::debug!(%key, "no converter chain found");
				self.push_unsolvable(key);
				None
			}
		}
	}
}

#[cfg(test)]
mod tests;
