use std::sync::Arc;

use morph_primitives::TypeTag;
use pretty_assertions::assert_eq;

use crate::config::{RegistryConfig, SearchConfig};
use crate::core::entry::{Converter, StatusKind};
use crate::core::error::RegistryError;
use crate::core::index::Registry;
use crate::core::key::SignatureKey;

#[test]
fn register_and_get() {
	let registry = Registry::new();
	assert!(registry.is_empty());
	let added = registry
		.register([
			Converter::new(|i: i8| i16::from(i)),
			Converter::named("atoi", |s: String| s.parse::<isize>()),
		])
		.unwrap();
	assert_eq!(added, 2);
	assert_eq!(registry.len(), 2);

	let entry = registry.get("func(String) isize").unwrap();
	assert_eq!(entry.name(), Some("atoi"));
	assert_eq!(entry.status(), StatusKind::ErrorLike);
	assert!(Arc::ptr_eq(&entry, &registry.get_named("atoi").unwrap()));
	assert!(registry.get("func(String) i8").is_none());
}

#[test]
fn duplicate_name_rejected() {
	let registry = Registry::new();
	registry.register_named("conv", |i: i8| i16::from(i)).unwrap();
	let err = registry.register_named("conv", |i: u8| u16::from(i)).unwrap_err();
	assert_eq!(err, RegistryError::DuplicateName { name: "conv".into() });

	let err = registry
		.register([
			Converter::named("a", |i: u16| u32::from(i)),
			Converter::named("a", |i: u32| u64::from(i)),
		])
		.unwrap_err();
	assert!(matches!(err, RegistryError::DuplicateName { .. }));
	assert_eq!(registry.len(), 1);
}

#[test]
fn duplicate_error_names_both_parties() {
	let registry = Registry::new();
	registry.register_named("atoi", |s: String| s.parse::<isize>()).unwrap();
	let err = registry
		.register_fn(|s: String| -> (isize, bool) { (0, s.is_empty()) })
		.unwrap_err();
	assert_eq!(
		err.to_string(),
		"duplicate converter func(String) isize: func(String) (isize, bool) conflicts with func atoi(String) (isize, error)"
	);
}

#[test]
fn unsolvable_set_is_insert_if_absent() {
	let registry = Registry::new();
	let key = SignatureKey::for_target(TypeTag::I8, &[TypeTag::STRING]);
	assert!(!registry.is_unsolvable(key.as_str()));
	assert!(registry.push_unsolvable(key.clone()));
	assert!(!registry.push_unsolvable(key.clone()));
	assert!(registry.is_unsolvable(key.as_str()));
	assert_eq!(registry.unsolvable_keys(), vec![key]);
}

#[test]
fn fork_copies_unsolvable_only_when_unrestricted() {
	let registry = Registry::new();
	registry.register_fn(|i: i8| i16::from(i)).unwrap();
	let key = SignatureKey::for_target(TypeTag::U8, &[TypeTag::STRING]);
	registry.push_unsolvable(key.clone());

	assert!(registry.fork(&[]).is_unsolvable(key.as_str()));
	let restricted = registry.fork(&["func(i8) i16"]);
	assert!(!restricted.is_unsolvable(key.as_str()));
	assert!(restricted.is_empty());

	let other = registry.fork(&["func(u8) u16"]);
	assert!(other.contains("func(i8) i16"));
	assert!(!other.is_unsolvable(key.as_str()));
}

#[test]
fn config_controls_builtins_and_depth() {
	let bare = Registry::with_config(RegistryConfig {
		builtins: false,
		search: SearchConfig { depth_cap: 2 },
	});
	assert!(bare.is_empty());
	assert_eq!(bare.search_config().depth_cap, 2);

	let full = Registry::with_config(RegistryConfig::default());
	assert_eq!(full.len(), 26);
	assert_eq!(full.fork(&[]).search_config(), full.search_config());
}

#[test]
fn concurrent_registration_and_lookup() {
	let registry = Registry::new();
	std::thread::scope(|s| {
		s.spawn(|| {
			for _ in 0..100 {
				let _ = registry.get("func(i8) i16");
				let _ = registry.keys();
			}
		});
		s.spawn(|| registry.register_fn(|i: i8| i16::from(i)).unwrap());
		s.spawn(|| registry.register_fn(|i: u8| u16::from(i)).unwrap());
		s.spawn(|| {
			registry.push_unsolvable(SignatureKey::for_target(TypeTag::BOOL, &[TypeTag::F32]));
		});
	});
	assert_eq!(registry.len(), 2);
	assert_eq!(registry.unsolvable_keys().len(), 1);
}
