use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use morph_primitives::{TypeTag, Value};
use pretty_assertions::assert_eq;

use crate::config::{RegistryConfig, SearchConfig};
use crate::core::entry::Converter;
use crate::core::index::Registry;

fn bare(depth_cap: usize) -> Registry {
	Registry::with_config(RegistryConfig {
		builtins: false,
		search: SearchConfig { depth_cap },
	})
}

fn chain_keys(registry: &Registry, target: TypeTag, args: &[TypeTag]) -> Vec<String> {
	registry
		.resolve(target, args)
		.map(|e| e.chain().iter().map(|l| l.key.to_string()).collect())
		.unwrap_or_default()
}

#[test]
fn exact_match_never_searches() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let registry = Registry::new();
	registry
		.register_fn(move |i: i8| {
			counter.fetch_add(1, Ordering::SeqCst);
			i16::from(i) * 2
		})
		.unwrap();

	for _ in 0..3 {
		assert_eq!(registry.convert(TypeTag::I16, vec![Value::I8(4)]).unwrap(), Value::I16(8));
	}
	assert_eq!(calls.load(Ordering::SeqCst), 3);
	let stats = registry.stats();
	assert_eq!(stats.exact_hits, 3);
	assert_eq!(stats.searches, 0);
}

#[test]
fn two_step_chain() {
	let registry = Registry::new();
	registry
		.register([Converter::new(|i: i8| i16::from(i) + 1), Converter::new(|i: i16| i.to_string())])
		.unwrap();

	let out = registry.convert(TypeTag::STRING, vec![Value::I8(41)]).unwrap();
	assert_eq!(out, Value::String("42".into()));

	let entry = registry.get("func(i8) String").unwrap();
	assert!(entry.is_synthetic());
	assert_eq!(
		entry.chain().iter().map(|l| l.key.as_str()).collect::<Vec<_>>(),
		["func(i8) i16", "func(i16) String"]
	);
	assert!(registry.is_used("func(i8) i16"));
	assert!(registry.is_used("func(i16) String"));

	registry.convert(TypeTag::STRING, vec![Value::I8(1)]).unwrap();
	let stats = registry.stats();
	assert_eq!(stats.searches, 1);
	assert_eq!(stats.synthesized, 1);
	assert_eq!(stats.exact_hits, 1);
}

#[test]
fn unsolvable_is_cached() {
	let registry = Registry::new();
	registry
		.register([Converter::new(|i: i8| i16::from(i)), Converter::new(|i: i16| i32::from(i))])
		.unwrap();

	for _ in 0..2 {
		let err = registry.convert(TypeTag::BOOL, vec![Value::I8(1)]).unwrap_err();
		assert!(err.is_not_supported());
	}
	let stats = registry.stats();
	assert_eq!(stats.searches, 1);
	assert_eq!(stats.unsolvable_hits, 1);
	assert!(registry.is_unsolvable("func(i8) bool"));
}

#[test]
fn leftover_arguments_never_accepted() {
	let registry = Registry::new();
	registry
		.register([
			Converter::new(|s: String| s.parse::<i64>()),
			Converter::new(|i: i64| i32::try_from(i).unwrap_or_default()),
			Converter::new(|a: i64, b: String| a + b.len() as i64),
			Converter::new(|i: u8| u16::from(i)),
		])
		.unwrap();

	// `String -> i64 -> i32` is shorter but ignores the second string.
	assert_eq!(
		chain_keys(&registry, TypeTag::I32, &[TypeTag::STRING, TypeTag::STRING]),
		["func(String) i64", "func(i64, String) i64", "func(i64) i32"]
	);
	let out = registry
		.convert(TypeTag::I32, vec![Value::String("40".into()), Value::String("ab".into())])
		.unwrap();
	assert_eq!(out, Value::I32(42));
}

#[test]
fn arguments_are_not_reordered() {
	let registry = Registry::new();
	registry
		.register([
			Converter::new(|i: u8| u16::from(i)),
			Converter::new(|s: String, n: u16| s.repeat(usize::from(n))),
		])
		.unwrap();
	assert!(
		registry
			.resolve(TypeTag::STRING, &[TypeTag::U8, TypeTag::STRING])
			.is_none()
	);
}

#[test]
fn synthetic_entries_compose_further() {
	let registry = Registry::new();
	registry
		.register([
			Converter::new(|i: i8| i16::from(i)),
			Converter::new(|i: i16| i32::from(i)),
			Converter::new(|i: i32| i64::from(i)),
			Converter::new(|i: i64| i.to_string()),
		])
		.unwrap();
	registry.resolve(TypeTag::I32, &[TypeTag::I8]).unwrap();
	let keys = chain_keys(&registry, TypeTag::STRING, &[TypeTag::I8]);
	assert_eq!(keys.first().map(String::as_str), Some("func(i8) i32"));
	assert_eq!(
		registry.convert(TypeTag::STRING, vec![Value::I8(-5)]).unwrap(),
		Value::String("-5".into())
	);
}

#[test]
fn depth_bound_limits_chain_length() {
	let build = |cap, padded| {
		let registry = bare(cap);
		registry
			.register([
				Converter::new(|i: i8| i16::from(i)),
				Converter::new(|i: i16| i32::from(i)),
				Converter::new(|i: i32| i64::from(i)),
				Converter::new(|i: i64| i.to_string()),
			])
			.unwrap();
		if padded {
			registry
				.register([Converter::new(|i: u8| u16::from(i)), Converter::new(|i: u16| u32::from(i))])
				.unwrap();
		}
		registry
	};
	// Four members need depth 3: six candidates and a cap of at least 3.
	assert!(build(10, false).resolve(TypeTag::STRING, &[TypeTag::I8]).is_none());
	assert!(build(2, true).resolve(TypeTag::STRING, &[TypeTag::I8]).is_none());
	assert_eq!(
		chain_keys(&build(10, true), TypeTag::STRING, &[TypeTag::I8]),
		["func(i8) i16", "func(i16) i32", "func(i32) i64", "func(i64) String"]
	);
}

#[test]
fn later_shorter_chain_replaces_earlier_one() {
	let registry = Registry::new();
	registry
		.register([
			Converter::new(|a: u8| i16::from(a)),
			Converter::new(|a: i16| i32::from(a)),
			Converter::new(|a: i32| a.to_string()),
			Converter::new(|a: u8| u64::from(a)),
			Converter::new(|a: u64| a.to_string()),
		])
		.unwrap();
	assert_eq!(
		chain_keys(&registry, TypeTag::STRING, &[TypeTag::U8]),
		["func(u8) u64", "func(u64) String"]
	);
}
