//! Callable units for runtime conversion.
//!
//! A [`Callable`] pairs a [`Signature`](morph_primitives::Signature) with an
//! [`Invoke`] implementation. Plain Rust closures become callables through
//! [`IntoCallable`]; their declared tags come from
//! [`Typed`](morph_primitives::Typed) and their outputs from
//! [`Outputs`](morph_primitives::Outputs).

pub mod callable;
pub mod caller;
pub mod fault;

pub use callable::{Callable, IntoCallable, Invoke};
pub use morph_primitives::Outputs;
pub use caller::{Caller, CallerError, Step};
pub use fault::{Fault, ShapePart};
