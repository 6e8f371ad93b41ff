use std::fmt;
use std::sync::Arc;

use morph_primitives::TypeTag;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use super::table::Table;
use super::unsolvable::UnsolvableSet;
use crate::builtins;
use crate::config::{RegistryConfig, SearchConfig};
use crate::core::entry::{ChainLink, Converter, ConverterEntry};
use crate::core::error::RegistryError;
use crate::core::key::SignatureKey;
use crate::stats::{RegistryStats, StatsSnapshot};

/// Converter registry with a negative cache.
///
/// Lock order: `unsolvable` before `table`. Only [`Registry::register`] holds
/// both at once.
pub struct Registry {
	table: RwLock<Table>,
	unsolvable: RwLock<UnsolvableSet>,
	search: SearchConfig,
	stats: RegistryStats,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("len", &self.len())
			.field("unsolvable", &self.unsolvable.read().keys().count())
			.field("search", &self.search)
			.finish()
	}
}

impl Registry {
	/// Creates an empty registry with default search settings.
	pub fn new() -> Self {
		Self::from_parts(Table::default(), UnsolvableSet::default(), SearchConfig::default())
	}

	/// Creates a registry preloaded with the primitive conversion table.
	pub fn with_builtins() -> Self {
		Self::with_config(RegistryConfig::default())
	}

	pub fn with_config(config: RegistryConfig) -> Self {
		let registry = Self::from_parts(Table::default(), UnsolvableSet::default(), config.search);
		if config.builtins
			&& let Err(e) = registry.register(builtins::all())
		{
			tracing::error!(error = %e, "builtin converter registration failed");
		}
		registry
	}

	fn from_parts(table: Table, unsolvable: UnsolvableSet, search: SearchConfig) -> Self {
		Self {
			table: RwLock::new(table),
			unsolvable: RwLock::new(unsolvable),
			search,
			stats: RegistryStats::default(),
		}
	}

	/// Registers a batch of converters.
	///
	/// The batch is validated as a whole before anything is inserted; on error
	/// the registry is unchanged. Returns the number of converters added.
	pub fn register(&self, converters: impl IntoIterator<Item = Converter>) -> Result<usize, RegistryError> {
		let batch: Vec<(SignatureKey, ConverterEntry)> = converters
			.into_iter()
			.map(|c| {
				let entry = c.into_entry();
				(entry.key(), entry)
			})
			.collect();

		let _unsolvable = self.unsolvable.read();
		let mut table = self.table.write();
		if let Err(e) = table.check(&batch) {
			tracing::warn!(error = %e, batch = batch.len(), "converter registration rejected");
			return Err(e);
		}

		let count = batch.len();
		for (key, entry) in batch {
			tracing::trace!(%key, label = %entry.label(), "registered converter");
			table.insert(key, Arc::new(entry));
		}
		Ok(count)
	}

	/// Registers a single anonymous converter.
	pub fn register_fn<M>(&self, f: impl morph_invocation::IntoCallable<M>) -> Result<(), RegistryError> {
		self.register([Converter::new(f)]).map(|_| ())
	}

	/// Registers a single named converter.
	pub fn register_named<M>(
		&self,
		name: impl Into<String>,
		f: impl morph_invocation::IntoCallable<M>,
	) -> Result<(), RegistryError> {
		self.register([Converter::named(name, f)]).map(|_| ())
	}

	pub fn get(&self, key: &str) -> Option<Arc<ConverterEntry>> {
		self.table.read().get(key).map(|slot| Arc::clone(&slot.entry))
	}

	pub fn get_named(&self, name: &str) -> Option<Arc<ConverterEntry>> {
		self.table.read().get_named(name).map(|slot| Arc::clone(&slot.entry))
	}

	pub fn contains(&self, key: &str) -> bool {
		self.table.read().get(key).is_some()
	}

	/// Returns true if the entry under `key` is a member of some synthetic chain.
	pub fn is_used(&self, key: &str) -> bool {
		self.table.read().get(key).is_some_and(|slot| slot.used)
	}

	pub fn len(&self) -> usize {
		self.table.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// All keys, sorted.
	pub fn keys(&self) -> Vec<SignatureKey> {
		self.table.read().keys().cloned().collect()
	}

	/// All entries in key order.
	pub fn entries(&self) -> Vec<(SignatureKey, Arc<ConverterEntry>)> {
		self.table
			.read()
			.iter()
			.map(|(key, slot)| (key.clone(), Arc::clone(&slot.entry)))
			.collect()
	}

	/// Produces an independent copy.
	///
	/// Entries listed in `exclude` are dropped unless a synthetic chain uses
	/// them. The unsolvable cache is copied only when nothing is excluded.
	/// The fork starts with fresh stats.
	pub fn fork(&self, exclude: &[&str]) -> Registry {
		let exclude: FxHashSet<&str> = exclude.iter().copied().collect();
		let table = self.table.read().filtered(&exclude);
		let unsolvable = if exclude.is_empty() {
			self.unsolvable.read().clone()
		} else {
			UnsolvableSet::default()
		};
		Self::from_parts(table, unsolvable, self.search)
	}

	/// Records `key` as unsolvable. Returns false if it was already recorded.
	pub fn push_unsolvable(&self, key: SignatureKey) -> bool {
		self.unsolvable.write().insert(key)
	}

	pub fn is_unsolvable(&self, key: &str) -> bool {
		self.unsolvable.read().contains(key)
	}

	/// Unsolvable request keys, sorted.
	pub fn unsolvable_keys(&self) -> Vec<SignatureKey> {
		self.unsolvable.read().keys().cloned().collect()
	}

	pub fn stats(&self) -> StatsSnapshot {
		self.stats.snapshot()
	}

	pub fn search_config(&self) -> SearchConfig {
		self.search
	}

	pub(crate) fn stats_ref(&self) -> &RegistryStats {
		&self.stats
	}

	/// Stores a discovered chain under `key` unless an entry appeared meanwhile.
	///
	/// Returns the stored entry, which is the existing one when another caller
	/// won the race.
	pub(crate) fn insert_synthetic(
		&self,
		key: SignatureKey,
		args: &[TypeTag],
		target: TypeTag,
		chain: Vec<ChainLink>,
	) -> Arc<ConverterEntry> {
		let mut table = self.table.write();
		if let Some(slot) = table.get(key.as_str()) {
			tracing::debug!(%key, "chain already stored by a concurrent resolve");
			return Arc::clone(&slot.entry);
		}
		for link in &chain {
			table.mark_used(link.key.as_str());
		}
		let chain_keys: Vec<&str> = chain.iter().map(|l| l.key.as_str()).collect();
		tracing::debug!(%key, chain = ?chain_keys, "synthesized converter chain");
		let entry = Arc::new(ConverterEntry::synthetic(args, target, chain));
		table.insert(key, Arc::clone(&entry));
		self.stats.synthesized();
		entry
	}
}
