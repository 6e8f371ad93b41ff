//! Chained invocation of arbitrary callables.
//!
//! A [`Caller`] consumes a flat sequence of [`Step`]s. Values are queued as
//! pending arguments; each callable takes its arguments from the values that
//! follow it and, when those run short, from the tail of the pending queue.
//!
//! ```
//! use morph_invocation::{Caller, Step};
//!
//! let mut caller = Caller::new();
//! caller.push([
//! 	Step::value(100i64),
//! 	Step::call(|i: i64| i.to_string()),
//! 	Step::call(|s: String| format!("{s},{s}")),
//! ]);
//! assert!(caller.ok());
//! assert_eq!(caller.last().unwrap()[0].as_str(), Some("100,100"));
//! ```

use morph_primitives::{SharedError, Typed, Value};

use crate::callable::{Callable, IntoCallable};
use crate::fault::Fault;

/// One element of a chained invocation.
#[derive(Debug, Clone)]
pub enum Step {
	Value(Value),
	Call(Callable),
}

impl Step {
	pub fn value(v: impl Typed) -> Self {
		Step::Value(v.into_value())
	}

	pub fn call<M>(f: impl IntoCallable<M>) -> Self {
		Step::Call(f.into_callable())
	}
}

impl From<Value> for Step {
	fn from(v: Value) -> Self {
		Step::Value(v)
	}
}

impl From<Callable> for Step {
	fn from(c: Callable) -> Self {
		Step::Call(c)
	}
}

/// Reasons a chained invocation stopped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallerError {
	/// A callable returned `false` as its trailing status.
	#[error("call failed")]
	Failed,
	/// A callable returned a non-nil trailing error.
	#[error("{0}")]
	Reported(SharedError),
	#[error("not enough arguments: need {needed}, have {available}")]
	NotEnoughArguments { needed: usize, available: usize },
	#[error(transparent)]
	Fault(#[from] Fault),
}

/// Stateful pipeline over callables and scalar arguments.
///
/// Once a step fails, later [`Caller::call`] and [`Caller::push`] calls are no-ops.
#[derive(Debug, Default)]
pub struct Caller {
	pending: Vec<Value>,
	outputs: Vec<Vec<Value>>,
	error: Option<CallerError>,
}

impl Caller {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs `steps`, discarding callable outputs from the pending queue.
	pub fn call(&mut self, steps: impl IntoIterator<Item = Step>) -> &mut Self {
		self.run(false, steps.into_iter().collect());
		self
	}

	/// Runs `steps`, queueing each callable's non-status outputs as pending arguments.
	pub fn push(&mut self, steps: impl IntoIterator<Item = Step>) -> &mut Self {
		self.run(true, steps.into_iter().collect());
		self
	}

	/// Returns true while no step has failed.
	pub fn ok(&self) -> bool {
		self.error.is_none()
	}

	pub fn error(&self) -> Option<&CallerError> {
		self.error.as_ref()
	}

	/// Returns the raw outputs of every invoked callable, in order.
	///
	/// A callable whose status signalled failure still has its outputs recorded.
	pub fn outputs(&self) -> &[Vec<Value>] {
		&self.outputs
	}

	/// Returns the outputs of the most recent callable.
	pub fn last(&self) -> Option<&[Value]> {
		self.outputs.last().map(Vec::as_slice)
	}

	/// Returns the queued arguments not yet consumed.
	pub fn pending(&self) -> &[Value] {
		&self.pending
	}

	fn run(&mut self, push: bool, steps: Vec<Step>) {
		if self.error.is_some() {
			return;
		}
		let mut steps = steps.into_iter().peekable();
		while let Some(step) = steps.next() {
			let callable = match step {
				Step::Value(v) => {
					self.pending.push(v);
					continue;
				}
				Step::Call(c) => c,
			};

			let arity = callable.arity();
			for _ in 0..arity {
				match steps.next_if(|s| matches!(s, Step::Value(_))) {
					Some(Step::Value(v)) => self.pending.push(v),
					_ => break,
				}
			}

			if self.pending.len() < arity {
				self.error = Some(CallerError::NotEnoughArguments {
					needed: arity,
					available: self.pending.len(),
				});
				return;
			}
			let args = self.pending.split_off(self.pending.len() - arity);

			let outs = match callable.call(args) {
				Ok(outs) => outs,
				Err(fault) => {
					tracing::debug!(signature = %callable.signature(), %fault, "chained call faulted");
					self.error = Some(fault.into());
					return;
				}
			};

			let (primary, status) = callable.signature().split_status();
			let primary = primary.len();
			self.outputs.push(outs.clone());
			if let (Some(status), Some(flag)) = (status, outs.last()) {
				match flag {
					Value::Bool(false) => {
						self.error = Some(CallerError::Failed);
						return;
					}
					Value::Error(e) => {
						self.error = Some(CallerError::Reported(e.clone()));
						return;
					}
					_ => {}
				}
				tracing::trace!(%status, "chained call status ok");
			}

			if push {
				self.pending.extend(outs.into_iter().take(primary));
			}
		}
	}
}
