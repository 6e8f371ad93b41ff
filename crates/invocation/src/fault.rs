use std::fmt;

use morph_primitives::TypeTag;

/// Which side of a call a shape mismatch was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePart {
	Arguments,
	Outputs,
}

impl fmt::Display for ShapePart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Arguments => write!(f, "arguments"),
			Self::Outputs => write!(f, "outputs"),
		}
	}
}

/// Faults raised at the invocation boundary.
///
/// These describe a callable that could not be run as declared. A callable
/// that ran and reported failure through its status output is not a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
	/// Wrong number of arguments supplied or outputs produced.
	#[error("invalid shape: expected {expected} {part}, got {got}")]
	InvalidShape {
		part: ShapePart,
		expected: usize,
		got: usize,
	},
	/// An argument carried a different tag than declared.
	#[error("argument {position}: expected {expected}, got {got}")]
	ArgumentType {
		position: usize,
		expected: TypeTag,
		got: TypeTag,
	},
	/// An output carried a different tag than declared.
	#[error("output {position}: expected {expected}, got {got}")]
	OutputType {
		position: usize,
		expected: TypeTag,
		got: TypeTag,
	},
	/// The callable panicked.
	#[error("panicked: {0}")]
	Panicked(String),
}

impl Fault {
	/// Returns true for arity and tag mismatches.
	pub fn is_shape(&self) -> bool {
		!matches!(self, Fault::Panicked(_))
	}

	pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
		let msg = if let Some(s) = payload.downcast_ref::<&'static str>() {
			(*s).to_string()
		} else if let Some(s) = payload.downcast_ref::<String>() {
			s.clone()
		} else {
			"<unknown panic>".to_string()
		};
		Fault::Panicked(msg)
	}
}
