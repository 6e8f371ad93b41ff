use std::sync::atomic::{AtomicU64, Ordering};

/// Resolution counters of one registry.
#[derive(Debug, Default)]
pub(crate) struct RegistryStats {
	exact_hits: AtomicU64,
	unsolvable_hits: AtomicU64,
	searches: AtomicU64,
	synthesized: AtomicU64,
}

/// Point-in-time copy of a registry's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
	/// Requests answered by a stored entry.
	pub exact_hits: u64,
	/// Requests answered by the unsolvable cache.
	pub unsolvable_hits: u64,
	/// Graph searches run.
	pub searches: u64,
	/// Synthetic entries inserted.
	pub synthesized: u64,
}

impl RegistryStats {
	pub(crate) fn exact_hit(&self) {
		self.exact_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn unsolvable_hit(&self) {
		self.unsolvable_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn search(&self) {
		self.searches.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn synthesized(&self) {
		self.synthesized.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn snapshot(&self) -> StatsSnapshot {
		StatsSnapshot {
			exact_hits: self.exact_hits.load(Ordering::Relaxed),
			unsolvable_hits: self.unsolvable_hits.load(Ordering::Relaxed),
			searches: self.searches.load(Ordering::Relaxed),
			synthesized: self.synthesized.load(Ordering::Relaxed),
		}
	}
}
