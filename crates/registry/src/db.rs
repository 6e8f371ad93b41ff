//! Process-wide default registry.
//!
//! A convenience over an explicit [`Registry`]: the instance is built on first
//! access with the default [`RegistryConfig`], builtins included.

use std::sync::OnceLock;

use morph_primitives::{TypeTag, Typed, Value};

use crate::config::RegistryConfig;
use crate::core::entry::Converter;
use crate::core::error::{ConvertError, RegistryError};
use crate::core::index::Registry;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Returns the default registry, building it on first use.
pub fn get() -> &'static Registry {
	REGISTRY.get_or_init(|| Registry::with_config(RegistryConfig::default()))
}

/// Registers converters on the default registry.
pub fn register(converters: impl IntoIterator<Item = Converter>) -> Result<usize, RegistryError> {
	get().register(converters)
}

/// Converts on the default registry.
pub fn convert(target: TypeTag, args: Vec<Value>) -> Result<Value, ConvertError> {
	get().convert(target, args)
}

/// Typed conversion on the default registry.
pub fn convert_to<T: Typed>(args: Vec<Value>) -> Result<T, ConvertError> {
	get().convert_to(args)
}
