#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Converter table, unsolvable cache and the [`Registry`] that guards them.
//!
//! # Purpose
//!
//! Stores converters under their canonical [`SignatureKey`](crate::SignatureKey),
//! keeps a sorted key index for deterministic iteration, and records request
//! keys proven to have no conversion.
//!
//! # Mental Model
//!
//! 1. **Registration:** [`Registry::register`] validates a whole batch, then
//!    inserts every entry under the exclusive table lock.
//! 2. **Lookup:** readers take the shared table lock and clone the entry's
//!    `Arc`; execution never holds a lock.
//! 3. **Synthesis:** a resolved chain is inserted once; members are marked
//!    used in the same critical section.
//! 4. **Fork:** a private copy of the table (and, unrestricted, of the cache)
//!    for search to explore without touching the live registry.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Registry`] | Public handle owning both locks, config and stats. |
//! | [`Table`](table::Table) | Key map, sorted index and name aliases. |
//! | [`Slot`](table::Slot) | An entry plus its `used` flag. |
//! | [`UnsolvableSet`](unsolvable::UnsolvableSet) | Sorted negative cache. |
//!
//! # Invariants
//!
//! - Must hold at most one entry per key, whatever the name or status flavor.
//!   - Enforced in: [`table::Table::check`].
//!   - Tested by: `invariants::test_duplicate_rejected_atomically`
//!   - Failure symptom: a later registration silently shadows an earlier one.
//!
//! - Must leave the registry unchanged when any member of a batch is rejected.
//!   - Enforced in: [`Registry::register`] (check before insert).
//!   - Tested by: `invariants::test_duplicate_rejected_atomically`
//!   - Failure symptom: half-registered batches.
//!
//! - Must iterate keys in sorted order.
//!   - Enforced in: [`table::Table::keys`] (`BTreeSet`).
//!   - Tested by: `invariants::test_sorted_keys`
//!   - Failure symptom: search results depend on registration order.
//!
//! - Must keep the first stored chain when two resolves race.
//!   - Enforced in: [`Registry::insert_synthetic`].
//!   - Tested by: `invariants::test_first_synthetic_wins`
//!   - Failure symptom: callers holding different entries for one key.
//!
//! - Must keep used entries in every fork.
//!   - Enforced in: [`table::Table::filtered`].
//!   - Tested by: `invariants::test_fork_keeps_used_entries`
//!   - Failure symptom: a fork cannot execute chains it copied.
//!
//! - Must not change the source registry when forking or when a fork changes.
//!   - Enforced in: [`Registry::fork`] (deep copy under a read lock).
//!   - Tested by: `invariants::test_fork_isolation`
//!   - Failure symptom: searches leak entries into the live registry.

mod runtime;
pub(crate) mod table;
pub(crate) mod unsolvable;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod tests;

pub use runtime::Registry;
