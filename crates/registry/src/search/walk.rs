//! Depth-bounded chain search.

use std::sync::Arc;

use morph_primitives::TypeTag;

use crate::config::SearchConfig;
use crate::core::entry::{ChainLink, ConverterEntry};
use crate::core::key::SignatureKey;

/// Returns true if `required` is satisfied by all of `produced` followed by a
/// leading run of `remaining`.
pub(crate) fn args_compare(produced: &[TypeTag], remaining: &[TypeTag], required: &[TypeTag]) -> bool {
	if produced.len() + remaining.len() < required.len() || required.len() < produced.len() {
		return false;
	}
	let (head, tail) = required.split_at(produced.len());
	head == produced && tail == &remaining[..tail.len()]
}

struct Node {
	key: SignatureKey,
	entry: Arc<ConverterEntry>,
	/// Depth of the last visit; 0 when never visited.
	visited: usize,
}

/// One search over a fixed candidate list.
pub(crate) struct ChainSearch {
	target: TypeTag,
	nodes: Vec<Node>,
	/// Deepest terminus still accepted; lowered below each accepted chain.
	bound: usize,
	best: Option<Vec<usize>>,
}

impl ChainSearch {
	/// `candidates` must be in key order.
	pub(crate) fn new(
		target: TypeTag,
		candidates: Vec<(SignatureKey, Arc<ConverterEntry>)>,
		config: SearchConfig,
	) -> Self {
		let nodes: Vec<Node> = candidates
			.into_iter()
			.map(|(key, entry)| Node { key, entry, visited: 0 })
			.collect();
		let bound = (nodes.len() / 2).min(config.depth_cap);
		Self {
			target,
			nodes,
			bound,
			best: None,
		}
	}

	/// Runs the search for `args`, returning the chain in execution order.
	pub(crate) fn run(mut self, args: &[TypeTag]) -> Option<Vec<ChainLink>> {
		let seeds: Vec<usize> = self
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, node)| {
				let entry = &node.entry;
				entry.primary_outs().first().is_some_and(|out| *out != self.target)
					&& args_compare(&[], args, entry.args())
			})
			.map(|(i, _)| i)
			.collect();

		let mut order = Vec::new();
		for seed in seeds {
			let entry = Arc::clone(&self.nodes[seed].entry);
			order.clear();
			order.push(seed);
			if self.walk(entry.primary_outs(), &args[entry.args().len()..], 0, &mut order) {
				tracing::trace!(seed = %self.nodes[seed].key, bound = self.bound, "seed improved the bound");
			}
		}

		let best = self.best?;
		Some(
			best.into_iter()
				.map(|i| ChainLink {
					key: self.nodes[i].key.clone(),
					entry: Arc::clone(&self.nodes[i].entry),
				})
				.collect(),
		)
	}

	/// Extends `order` from its last node. Returns true if a terminus was
	/// accepted anywhere below.
	fn walk(&mut self, produced: &[TypeTag], remaining: &[TypeTag], depth: usize, order: &mut Vec<usize>) -> bool {
		let depth = depth + 1;
		if depth > self.bound {
			return false;
		}
		let (Some(&seed), Some(&prev)) = (order.first(), order.last()) else {
			return false;
		};
		let mut found = false;

		for i in 0..self.nodes.len() {
			if i == seed || i == prev {
				continue;
			}
			let visited = self.nodes[i].visited;
			if visited != 0 && visited < depth {
				continue;
			}
			let entry = Arc::clone(&self.nodes[i].entry);
			let Some(&first) = entry.primary_outs().first() else {
				continue;
			};
			let required = entry.args();
			if !args_compare(produced, remaining, required) {
				continue;
			}

			if first == self.target {
				if produced.len() + remaining.len() != required.len() {
					continue;
				}
				self.nodes[i].visited = depth;
				let mut path = order.clone();
				path.push(i);
				self.best = Some(path);
				// Depth counts members after the seed; the bound is inclusive.
				self.bound = depth - 1;
				return true;
			}

			self.nodes[i].visited = depth;
			let rest = &remaining[required.len() - produced.len()..];
			order.push(i);
			if self.walk(entry.primary_outs(), rest, depth, order) {
				found = true;
			}
			order.pop();
		}
		found
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	const S: TypeTag = TypeTag::STRING;
	const I: TypeTag = TypeTag::I64;

	#[rstest]
	#[case(&[], &[S], &[S], true)]
	#[case(&[], &[S, S], &[S], true)]
	#[case(&[], &[S], &[S, S], false)]
	#[case(&[I], &[S], &[I, S], true)]
	#[case(&[I], &[S], &[S, I], false)]
	#[case(&[I], &[], &[I], true)]
	#[case(&[I, I], &[], &[I], false)]
	#[case(&[I], &[S, I], &[I, I], false)]
	fn compare(#[case] produced: &[TypeTag], #[case] remaining: &[TypeTag], #[case] required: &[TypeTag], #[case] ok: bool) {
		assert_eq!(args_compare(produced, remaining, required), ok);
	}

	proptest! {
		#[test]
		fn produced_then_remaining_always_matches(
			produced in proptest::collection::vec(0u32..4, 0..3),
			remaining in proptest::collection::vec(0u32..4, 0..3),
			take in 0usize..3,
		) {
			let produced: Vec<TypeTag> = produced.into_iter().map(|n| TypeTag::intern(&format!("t{n}"))).collect();
			let remaining: Vec<TypeTag> = remaining.into_iter().map(|n| TypeTag::intern(&format!("t{n}"))).collect();
			let take = take.min(remaining.len());
			let mut required = produced.clone();
			required.extend_from_slice(&remaining[..take]);
			prop_assert!(args_compare(&produced, &remaining, &required));
		}
	}
}
