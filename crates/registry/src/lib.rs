#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Runtime conversion registry.
//!
//! # Purpose
//!
//! Holds converters keyed by their canonical signature and answers
//! "turn these values into a value of tag T". A request with no registered
//! converter is solved by composing existing converters into a chain; solved
//! chains are memoized as synthetic entries and unsolvable requests are cached.
//!
//! # Mental Model
//!
//! | Stage | Where | What happens |
//! |-------|-------|--------------|
//! | Registration | [`Registry::register`] | Closures become [`ConverterEntry`]s under a [`SignatureKey`]. |
//! | Exact lookup | [`Registry::resolve`] | The request key is looked up directly. |
//! | Negative cache | [`Registry::is_unsolvable`] | Known failures return without searching. |
//! | Search | [`search`] | Bounded depth-first composition over a fork. |
//! | Execution | [`exec`] | Members run in order; status outputs gate each step. |
//!
//! # Concurrency
//!
//! The converter table and the unsolvable cache sit behind two independent
//! [`parking_lot::RwLock`]s. Lock order is unsolvable cache then table; no path
//! takes them in the other order.
//!
//! # Example
//!
//! ```
//! use morph_primitives::{TypeTag, Value};
//! use morph_registry::Registry;
//!
//! let registry = Registry::with_builtins();
//! let out = registry.convert(TypeTag::I8, vec![Value::String("10".into())]).unwrap();
//! assert_eq!(out, Value::I8(10));
//! ```

pub mod builtins;
pub mod config;
pub mod convert;
pub mod core;
pub mod db;
pub mod exec;
pub mod search;
pub mod stats;

pub use config::{ConfigError, RegistryConfig, SearchConfig};
pub use core::entry::{ChainLink, Converter, ConverterEntry, StatusKind};
pub use core::error::{ConvertError, FailureCause, RegistryError};
pub use core::index::Registry;
pub use core::key::SignatureKey;
pub use stats::StatsSnapshot;
