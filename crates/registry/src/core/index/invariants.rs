use morph_primitives::{TypeTag, Value};
use pretty_assertions::assert_eq;

use crate::core::entry::Converter;
use crate::core::error::RegistryError;
use crate::core::index::Registry;

/// Invariant: one entry per key, and a rejected batch changes nothing.
///
/// Name and status flavor do not distinguish converters of the same shape.
pub(crate) fn inv_duplicate_rejected_atomically() {
	let registry = Registry::new();
	registry.register([Converter::new(|i: i8| (i as u8, i >= 0))]).unwrap();

	let err = registry
		.register([
			Converter::new(|i: u16| u32::from(i)),
			Converter::named("to_u8", |i: i8| i as u8),
		])
		.unwrap_err();
	assert!(matches!(err, RegistryError::Duplicate { ref key, .. } if key.as_str() == "func(i8) u8"));
	assert_eq!(registry.len(), 1);
	assert!(!registry.contains("func(u16) u32"));

	let err = registry
		.register([
			Converter::new(|s: String| s.parse::<u16>()),
			Converter::new(|s: String| -> (u16, bool) { (0, s.is_empty()) }),
		])
		.unwrap_err();
	assert!(matches!(err, RegistryError::Duplicate { .. }));
	assert_eq!(registry.len(), 1);
}

#[cfg_attr(test, test)]
pub(crate) fn test_duplicate_rejected_atomically() {
	inv_duplicate_rejected_atomically()
}

/// Invariant: key iteration is sorted whatever the registration order.
pub(crate) fn inv_sorted_keys() {
	let registry = Registry::new();
	registry
		.register([
			Converter::new(|i: u8| u16::from(i)),
			Converter::new(|a: String, b: String| a + &b),
			Converter::new(|s: String| s.parse::<isize>()),
			Converter::new(|i: i8| i16::from(i)),
		])
		.unwrap();
	let keys: Vec<String> = registry.keys().iter().map(ToString::to_string).collect();
	assert_eq!(
		keys,
		[
			"func(String) isize",
			"func(String, String) String",
			"func(i8) i16",
			"func(u8) u16",
		]
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_sorted_keys() {
	inv_sorted_keys()
}

/// Invariant: the first stored synthetic entry for a key wins.
pub(crate) fn inv_first_synthetic_wins() {
	let registry = Registry::new();
	registry
		.register([Converter::new(|i: i8| i16::from(i)), Converter::new(|i: i16| i32::from(i))])
		.unwrap();

	let first = registry.resolve(TypeTag::I32, &[TypeTag::I8]).unwrap();
	let chain = first.chain().to_vec();
	let second = registry.insert_synthetic(first.key(), &[TypeTag::I8], TypeTag::I32, chain);
	assert!(std::sync::Arc::ptr_eq(&first, &second));
	assert_eq!(registry.stats().synthesized, 1);
}

#[cfg_attr(test, test)]
pub(crate) fn test_first_synthetic_wins() {
	inv_first_synthetic_wins()
}

/// Invariant: exclusion never drops an entry a chain uses.
pub(crate) fn inv_fork_keeps_used_entries() {
	let registry = Registry::new();
	registry
		.register([
			Converter::new(|i: i8| i16::from(i)),
			Converter::new(|i: i16| i32::from(i)),
			Converter::new(|i: u8| u16::from(i)),
		])
		.unwrap();
	registry.resolve(TypeTag::I32, &[TypeTag::I8]).unwrap();
	assert!(registry.is_used("func(i8) i16"));

	let fork = registry.fork(&["func(i8) i16", "func(u8) u16"]);
	assert!(fork.contains("func(i8) i16"));
	assert!(fork.contains("func(i16) i32"));
	assert!(!fork.contains("func(u8) u16"));
	assert_eq!(fork.convert(TypeTag::I32, vec![Value::I8(4)]).unwrap(), Value::I32(4));
}

#[cfg_attr(test, test)]
pub(crate) fn test_fork_keeps_used_entries() {
	inv_fork_keeps_used_entries()
}

/// Invariant: forks and their source evolve independently.
pub(crate) fn inv_fork_isolation() {
	let registry = Registry::new();
	registry.register([Converter::new(|i: i8| i16::from(i))]).unwrap();
	let fork = registry.fork(&[]);

	fork.register([Converter::new(|i: i16| i32::from(i))]).unwrap();
	assert!(!registry.contains("func(i16) i32"));

	registry.register([Converter::new(|i: u8| u16::from(i))]).unwrap();
	assert!(!fork.contains("func(u8) u16"));
	assert_eq!(fork.len(), 2);
	assert_eq!(registry.len(), 2);
}

#[cfg_attr(test, test)]
pub(crate) fn test_fork_isolation() {
	inv_fork_isolation()
}
