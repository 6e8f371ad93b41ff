//! Core types for runtime conversion: type tags, values and signatures.
//!
//! Every value that flows through a conversion carries an explicit [`TypeTag`].
//! Tags are interned names; the builtin scalar tags are fixed constants and
//! extension types are interned on first use. A callable's shape is described by
//! a [`Signature`], whose rendering doubles as the canonical lookup key.

/// Interned type tags.
pub mod tag;
/// Closure return shapes.
pub mod outputs;
/// Rust type bridge for values.
pub mod typed;
/// Callable shapes and canonical key rendering.
pub mod signature;
/// Tagged runtime values.
pub mod value;

pub use outputs::Outputs;
pub use signature::{Signature, Tags, signature_of, signatures_of};
pub use tag::TypeTag;
pub use typed::{AnyValue, Typed};
pub use value::{SharedError, Value};
