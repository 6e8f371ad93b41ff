use crate::{AnyValue, Tags, TypeTag, Typed, Value};

/// Return types usable by adapted closures.
///
/// A trailing `bool` or [`Result`] error is what the registry later reads as
/// the success indicator. Extension types get an impl from
/// [`typed_custom!`](crate::typed_custom).
pub trait Outputs: Send + 'static {
	fn output_tags() -> Tags;
	fn into_values(self) -> Vec<Value>;
}

macro_rules! impl_single_output {
	($($ty:ty),* $(,)?) => {
		$(
			impl Outputs for $ty {
				fn output_tags() -> Tags {
					Tags::from_slice(&[<$ty as Typed>::type_tag()])
				}

				fn into_values(self) -> Vec<Value> {
					vec![self.into_value()]
				}
			}
		)*
	};
}

impl_single_output!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, AnyValue);

impl Outputs for () {
	fn output_tags() -> Tags {
		Tags::new()
	}

	fn into_values(self) -> Vec<Value> {
		Vec::new()
	}
}

impl<A: Typed, B: Typed> Outputs for (A, B) {
	fn output_tags() -> Tags {
		Tags::from_slice(&[A::type_tag(), B::type_tag()])
	}

	fn into_values(self) -> Vec<Value> {
		vec![self.0.into_value(), self.1.into_value()]
	}
}

impl<A: Typed, B: Typed, C: Typed> Outputs for (A, B, C) {
	fn output_tags() -> Tags {
		Tags::from_slice(&[A::type_tag(), B::type_tag(), C::type_tag()])
	}

	fn into_values(self) -> Vec<Value> {
		vec![self.0.into_value(), self.1.into_value(), self.2.into_value()]
	}
}

impl<T, E> Outputs for Result<T, E>
where
	T: Typed,
	E: std::error::Error + Send + Sync + 'static,
{
	fn output_tags() -> Tags {
		Tags::from_slice(&[T::type_tag(), TypeTag::ERROR])
	}

	fn into_values(self) -> Vec<Value> {
		match self {
			Ok(v) => vec![v.into_value(), Value::Nil],
			Err(e) => vec![Value::Nil, Value::error(e)],
		}
	}
}
