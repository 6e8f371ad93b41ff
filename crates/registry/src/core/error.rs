//! Registry and conversion errors.

use morph_invocation::Fault;
use morph_primitives::{SharedError, TypeTag};

use crate::core::key::SignatureKey;

/// Registration rejections. A rejected batch leaves the registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// The batch contains a converter whose key is already taken, or two
	/// converters sharing a key.
	#[error("duplicate converter {key}: {incoming} conflicts with {existing}")]
	Duplicate {
		key: SignatureKey,
		existing: String,
		incoming: String,
	},
	/// A converter name is already bound to another key.
	#[error("duplicate converter name: {name}")]
	DuplicateName { name: String },
}

/// Why a converter ran but produced no usable result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FailureCause {
	/// A trailing `bool` status was `false`.
	#[error("status reported failure")]
	Rejected,
	/// A trailing `error` status was non-nil.
	#[error("{0}")]
	Reported(SharedError),
	/// The converter panicked.
	#[error("panicked: {0}")]
	Panicked(String),
}

/// Conversion failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConvertError {
	#[error("invalid arguments: {0}")]
	InvalidArguments(String),
	/// No converter or chain exists for the request.
	#[error("conversion not supported: {key}")]
	NotSupported { key: SignatureKey },
	/// A converter ran and reported failure.
	#[error("conversion to {target} failed: {cause}")]
	ConversionFailed {
		target: TypeTag,
		#[source]
		cause: FailureCause,
	},
	/// Arguments or outputs did not match a declared signature.
	#[error("invalid shape: {0}")]
	InvalidShape(Fault),
}

impl ConvertError {
	pub(crate) fn from_fault(target: TypeTag, fault: Fault) -> Self {
		match fault {
			Fault::Panicked(msg) => ConvertError::ConversionFailed {
				target,
				cause: FailureCause::Panicked(msg),
			},
			shape => ConvertError::InvalidShape(shape),
		}
	}

	pub fn is_not_supported(&self) -> bool {
		matches!(self, ConvertError::NotSupported { .. })
	}

	pub fn is_conversion_failed(&self) -> bool {
		matches!(self, ConvertError::ConversionFailed { .. })
	}
}
