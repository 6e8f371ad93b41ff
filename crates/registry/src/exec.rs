//! Execution of resolved entries.
//!
//! # Role
//!
//! Runs a [`ConverterEntry`] against concrete values. Direct entries invoke
//! their callable; synthetic entries run each chain member in order. Every
//! invocation goes through [`Callable::call`](morph_invocation::Callable::call),
//! which captures panics, so no fault escapes this module as a panic.
//!
//! # Invariants
//!
//! - A `false` bool status or non-nil error status aborts the whole chain with
//!   [`ConvertError::ConversionFailed`].
//! - Each chain member receives every primary output of the previous member,
//!   oldest first, followed by the next unconsumed caller arguments.
//! - A chain must consume every caller argument.

use morph_invocation::{Fault, ShapePart};
use morph_primitives::{TypeTag, Value};

use crate::core::entry::{ConverterEntry, StatusKind};
use crate::core::error::{ConvertError, FailureCause};

/// Runs `entry` and returns its first primary output.
///
/// `target` is only used to label failures.
pub fn execute(entry: &ConverterEntry, target: TypeTag, args: Vec<Value>) -> Result<Value, ConvertError> {
	let outs = run(entry, target, args)?;
	outs.into_iter().next().ok_or(ConvertError::InvalidShape(Fault::InvalidShape {
		part: ShapePart::Outputs,
		expected: 1,
		got: 0,
	}))
}

/// Runs `entry`, returning its primary outputs.
fn run(entry: &ConverterEntry, target: TypeTag, args: Vec<Value>) -> Result<Vec<Value>, ConvertError> {
	match entry.callable() {
		Some(callable) => {
			let mut outs = callable
				.call(args)
				.map_err(|fault| ConvertError::from_fault(target, fault))?;
			check_status(entry.status(), target, &outs)?;
			outs.truncate(entry.primary_count());
			Ok(outs)
		}
		None => run_chain(entry, target, args),
	}
}

fn run_chain(entry: &ConverterEntry, target: TypeTag, args: Vec<Value>) -> Result<Vec<Value>, ConvertError> {
	let expected = args.len();
	let mut originals = args.into_iter();
	let mut carried: Vec<Value> = Vec::new();

	for link in entry.chain() {
		let member = &link.entry;
		let need = member.args().len().checked_sub(carried.len()).ok_or_else(|| {
			ConvertError::InvalidShape(Fault::InvalidShape {
				part: ShapePart::Arguments,
				expected: member.args().len(),
				got: carried.len(),
			})
		})?;
		let mut call_args = std::mem::take(&mut carried);
		call_args.extend(originals.by_ref().take(need));
		tracing::trace!(member = %link.key, args = call_args.len(), "running chain member");
		carried = run(member, target, call_args)?;
	}

	let leftover = originals.len();
	if leftover > 0 {
		return Err(ConvertError::InvalidShape(Fault::InvalidShape {
			part: ShapePart::Arguments,
			expected: expected - leftover,
			got: expected,
		}));
	}
	Ok(carried)
}

fn check_status(status: StatusKind, target: TypeTag, outs: &[Value]) -> Result<(), ConvertError> {
	let failed = |cause| ConvertError::ConversionFailed { target, cause };
	match (status, outs.last()) {
		(StatusKind::None, _) => Ok(()),
		(StatusKind::Bool, Some(Value::Bool(true))) => Ok(()),
		(StatusKind::Bool, _) => Err(failed(FailureCause::Rejected)),
		(StatusKind::ErrorLike, Some(Value::Nil)) => Ok(()),
		(StatusKind::ErrorLike, Some(Value::Error(e))) => Err(failed(FailureCause::Reported(e.clone()))),
		(StatusKind::ErrorLike, _) => Err(failed(FailureCause::Rejected)),
	}
}
