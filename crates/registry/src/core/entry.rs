//! Converter entries and registration items.

use std::fmt;
use std::sync::Arc;

use morph_invocation::{Callable, IntoCallable};
use morph_primitives::{Signature, Tags, TypeTag};

use crate::core::key::SignatureKey;

/// How a converter reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
	/// No trailing status output.
	None,
	/// Trailing `bool`; `false` means the conversion did not succeed.
	Bool,
	/// Trailing `error`; non-nil means the conversion did not succeed.
	ErrorLike,
}

impl StatusKind {
	fn from_tag(tag: Option<TypeTag>) -> Self {
		match tag {
			Some(TypeTag::BOOL) => StatusKind::Bool,
			Some(TypeTag::ERROR) => StatusKind::ErrorLike,
			_ => StatusKind::None,
		}
	}
}

/// One member of a synthetic chain.
#[derive(Debug, Clone)]
pub struct ChainLink {
	pub key: SignatureKey,
	pub entry: Arc<ConverterEntry>,
}

/// A converter stored in the registry.
///
/// Either wraps a user callable or is synthetic, composed of an ordered chain
/// of other entries. A synthetic entry has exactly one primary output and no
/// status output.
pub struct ConverterEntry {
	name: Option<String>,
	args: Tags,
	outs: Tags,
	primary: usize,
	status: StatusKind,
	callable: Option<Callable>,
	chain: Vec<ChainLink>,
}

impl ConverterEntry {
	pub fn from_callable(name: Option<String>, callable: Callable) -> Self {
		let signature = callable.signature();
		let (primary, status) = signature.split_status();
		Self {
			name: name.filter(|n| !n.is_empty()),
			args: signature.args.clone(),
			outs: signature.outs.clone(),
			primary: primary.len(),
			status: StatusKind::from_tag(status),
			callable: Some(callable),
			chain: Vec::new(),
		}
	}

	pub fn synthetic(args: &[TypeTag], target: TypeTag, chain: Vec<ChainLink>) -> Self {
		Self {
			name: None,
			args: Tags::from_slice(args),
			outs: Tags::from_slice(&[target]),
			primary: 1,
			status: StatusKind::None,
			callable: None,
			chain,
		}
	}

	/// Canonical key: arguments and primary outputs.
	pub fn key(&self) -> SignatureKey {
		SignatureKey::new(&self.args, self.primary_outs())
	}

	/// Full rendering including name and status output.
	pub fn label(&self) -> String {
		Signature::render(self.name.as_deref(), &self.args, &self.outs)
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn args(&self) -> &[TypeTag] {
		&self.args
	}

	pub fn outs(&self) -> &[TypeTag] {
		&self.outs
	}

	pub fn primary_outs(&self) -> &[TypeTag] {
		&self.outs[..self.primary]
	}

	pub fn primary_count(&self) -> usize {
		self.primary
	}

	pub fn status(&self) -> StatusKind {
		self.status
	}

	pub fn callable(&self) -> Option<&Callable> {
		self.callable.as_ref()
	}

	pub fn chain(&self) -> &[ChainLink] {
		&self.chain
	}

	pub fn is_synthetic(&self) -> bool {
		self.callable.is_none()
	}
}

impl fmt::Debug for ConverterEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("ConverterEntry");
		s.field("label", &self.label()).field("status", &self.status);
		if !self.chain.is_empty() {
			let keys: Vec<&str> = self.chain.iter().map(|l| l.key.as_str()).collect();
			s.field("chain", &keys);
		}
		s.finish()
	}
}

/// Registration item: a callable and an optional name.
#[derive(Debug, Clone)]
pub struct Converter {
	pub name: Option<String>,
	pub callable: Callable,
}

impl Converter {
	pub fn new<M>(f: impl IntoCallable<M>) -> Self {
		Self {
			name: None,
			callable: f.into_callable(),
		}
	}

	pub fn named<M>(name: impl Into<String>, f: impl IntoCallable<M>) -> Self {
		Self {
			name: Some(name.into()),
			callable: f.into_callable(),
		}
	}

	pub(crate) fn into_entry(self) -> ConverterEntry {
		ConverterEntry::from_callable(self.name, self.callable)
	}
}
