//! Canonical signature keys.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use morph_primitives::{Signature, TypeTag};

/// Canonical text key of a converter shape.
///
/// Rendered from argument tags and primary output tags only; converter names
/// and trailing status outputs never take part. Two converters with the same
/// key are duplicates.
///
/// Ordering is plain byte order of the rendered text, which is the order the
/// search walks candidates in.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureKey(Arc<str>);

impl SignatureKey {
	pub fn new(args: &[TypeTag], primary_outs: &[TypeTag]) -> Self {
		Self(Signature::render(None, args, primary_outs).into())
	}

	/// Key of a request for a single `target` from `args`.
	pub fn for_target(target: TypeTag, args: &[TypeTag]) -> Self {
		Self::new(args, &[target])
	}

	/// Rendering with a name alias, for diagnostics about named lookups.
	pub fn named(name: &str, args: &[TypeTag], primary_outs: &[TypeTag]) -> Self {
		Self(Signature::render(Some(name), args, primary_outs).into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for SignatureKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for SignatureKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SignatureKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for SignatureKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SignatureKey({:?})", &*self.0)
	}
}
