//! Callable units and closure adapters.
//!
//! # Role
//!
//! This module defines the invocation capability ([`Invoke`]) and the unit the
//! registry stores ([`Callable`]). It owns the argument/output shape checks and
//! converts panics raised by user code into [`Fault::Panicked`].
//!
//! # Invariants
//!
//! - A callable's signature is fixed at construction; [`Callable::call`] rejects
//!   argument lists whose arity or tags differ from it.
//! - Non-nil outputs always carry their declared tag. A `nil` output is the
//!   placeholder for a primary result that was not produced (failed status).

use std::fmt;
use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use morph_primitives::{Outputs, Signature, Tags, TypeTag, Typed, Value};

use crate::fault::{Fault, ShapePart};

/// Runs a unit with concrete argument values.
pub trait Invoke: Send + Sync {
	/// Invokes with `args`, returning every declared output including a trailing status.
	fn invoke(&self, args: Vec<Value>) -> Result<Vec<Value>, Fault>;
}

/// A signature paired with its invoker.
#[derive(Clone)]
pub struct Callable {
	signature: Signature,
	invoker: Arc<dyn Invoke>,
}

impl fmt::Debug for Callable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callable")
			.field("signature", &self.signature.to_string())
			.finish()
	}
}

impl Callable {
	/// Creates a callable from an explicit signature and invoker.
	pub fn new(signature: Signature, invoker: Arc<dyn Invoke>) -> Self {
		Self { signature, invoker }
	}

	/// Adapts a closure or function.
	pub fn from_fn<M>(f: impl IntoCallable<M>) -> Self {
		f.into_callable()
	}

	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	pub fn arity(&self) -> usize {
		self.signature.args.len()
	}

	/// Invokes after checking `args` against the signature.
	///
	/// Panics inside the invoker are captured as [`Fault::Panicked`].
	pub fn call(&self, args: Vec<Value>) -> Result<Vec<Value>, Fault> {
		check_args(&self.signature.args, &args)?;
		let outs = catch_unwind(AssertUnwindSafe(|| self.invoker.invoke(args))).map_err(Fault::from_panic)??;
		check_outs(&self.signature.outs, &outs)?;
		Ok(outs)
	}
}

fn check_args(declared: &[TypeTag], args: &[Value]) -> Result<(), Fault> {
	if declared.len() != args.len() {
		return Err(Fault::InvalidShape {
			part: ShapePart::Arguments,
			expected: declared.len(),
			got: args.len(),
		});
	}
	for (position, (expected, value)) in declared.iter().zip(args).enumerate() {
		if value.tag() != *expected {
			return Err(Fault::ArgumentType {
				position,
				expected: *expected,
				got: value.tag(),
			});
		}
	}
	Ok(())
}

fn check_outs(declared: &[TypeTag], outs: &[Value]) -> Result<(), Fault> {
	if declared.len() != outs.len() {
		return Err(Fault::InvalidShape {
			part: ShapePart::Outputs,
			expected: declared.len(),
			got: outs.len(),
		});
	}
	for (position, (expected, value)) in declared.iter().zip(outs).enumerate() {
		if !value.is_nil() && value.tag() != *expected {
			return Err(Fault::OutputType {
				position,
				expected: *expected,
				got: value.tag(),
			});
		}
	}
	Ok(())
}

/// Conversion into a [`Callable`].
///
/// `Marker` only disambiguates the closure arities; callers never name it.
pub trait IntoCallable<Marker>: Send + Sync + 'static {
	fn into_callable(self) -> Callable;
}

impl IntoCallable<Callable> for Callable {
	fn into_callable(self) -> Callable {
		self
	}
}

struct FnInvoker<F, M> {
	f: F,
	_marker: PhantomData<fn() -> M>,
}

macro_rules! count_idents {
	() => { 0usize };
	($head:ident $($tail:ident)*) => { 1usize + count_idents!($($tail)*) };
}

macro_rules! impl_into_callable {
	($($arg:ident),*) => {
		impl<F, R, $($arg,)*> IntoCallable<fn($($arg,)*) -> R> for F
		where
			F: Fn($($arg),*) -> R + Send + Sync + 'static,
			R: Outputs,
			$($arg: Typed,)*
		{
			fn into_callable(self) -> Callable {
				let signature = Signature {
					args: Tags::from_slice(&[$(<$arg as Typed>::type_tag()),*]),
					outs: R::output_tags(),
				};
				let invoker: FnInvoker<F, fn($($arg,)*) -> R> = FnInvoker {
					f: self,
					_marker: PhantomData,
				};
				Callable::new(signature, Arc::new(invoker))
			}
		}

		impl<F, R, $($arg,)*> Invoke for FnInvoker<F, fn($($arg,)*) -> R>
		where
			F: Fn($($arg),*) -> R + Send + Sync + 'static,
			R: Outputs,
			$($arg: Typed,)*
		{
			#[allow(non_snake_case, unused_mut, unused_variables)]
			fn invoke(&self, args: Vec<Value>) -> Result<Vec<Value>, Fault> {
				let expected = count_idents!($($arg)*);
				let got = args.len();
				if got != expected {
					return Err(Fault::InvalidShape {
						part: ShapePart::Arguments,
						expected,
						got,
					});
				}
				let mut values = args.into_iter().enumerate();
				$(
					let $arg = {
						let (position, value) = values.next().ok_or(Fault::InvalidShape {
							part: ShapePart::Arguments,
							expected,
							got,
						})?;
						let tag = value.tag();
						<$arg as Typed>::from_value(value).ok_or(Fault::ArgumentType {
							position,
							expected: <$arg as Typed>::type_tag(),
							got: tag,
						})?
					};
				)*
				Ok((self.f)($($arg),*).into_values())
			}
		}
	};
}

impl_into_callable!();
impl_into_callable!(A);
impl_into_callable!(A, B);
impl_into_callable!(A, B, C);
impl_into_callable!(A, B, C, D);
