//! Conversion entry points on [`Registry`].

use morph_invocation::Fault;
use morph_primitives::{TypeTag, Typed, Value, signatures_of};

use crate::core::error::ConvertError;
use crate::core::index::Registry;
use crate::core::key::SignatureKey;
use crate::exec;

impl Registry {
	/// Converts `args` into a value tagged `target`.
	///
	/// Errors with [`ConvertError::InvalidArguments`] on an empty argument list,
	/// [`ConvertError::NotSupported`] when no converter or chain exists, and
	/// [`ConvertError::ConversionFailed`] when a converter reports failure.
	pub fn convert(&self, target: TypeTag, args: Vec<Value>) -> Result<Value, ConvertError> {
		if args.is_empty() {
			return Err(ConvertError::InvalidArguments("no arguments given".into()));
		}
		let tags = signatures_of(&args);
		let Some(entry) = self.resolve(target, &tags) else {
			return Err(ConvertError::NotSupported {
				key: SignatureKey::for_target(target, &tags),
			});
		};
		let out = exec::execute(&entry, target, args)?;
		if out.tag() != target {
			return Err(ConvertError::InvalidShape(Fault::OutputType {
				position: 0,
				expected: target,
				got: out.tag(),
			}));
		}
		Ok(out)
	}

	/// Converts `args` into a value with the same tag as `example`.
	///
	/// Only the tag of `example` is read.
	pub fn convert_value(&self, example: &Value, args: Vec<Value>) -> Result<Value, ConvertError> {
		self.convert(example.tag(), args)
	}

	/// Converts `args` into `T`.
	pub fn convert_to<T: Typed>(&self, args: Vec<Value>) -> Result<T, ConvertError> {
		let out = self.convert(T::type_tag(), args)?;
		let got = out.tag();
		T::from_value(out).ok_or(ConvertError::InvalidShape(Fault::OutputType {
			position: 0,
			expected: T::type_tag(),
			got,
		}))
	}

	/// Invokes the converter registered under `name` with the usual status
	/// handling, bypassing resolution.
	pub fn call_named(&self, name: &str, args: Vec<Value>) -> Result<Value, ConvertError> {
		let Some(entry) = self.get_named(name) else {
			return Err(ConvertError::NotSupported {
				key: SignatureKey::named(name, &signatures_of(&args), &[]),
			});
		};
		let target = entry.primary_outs().first().copied().unwrap_or(TypeTag::NIL);
		exec::execute(&entry, target, args)
	}
}
