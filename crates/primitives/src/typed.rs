use std::any::Any;
use std::sync::Arc;

use crate::{TypeTag, Value};

/// Rust types that can travel as a [`Value`].
///
/// The tag returned by [`Typed::type_tag`] is what a registered callable
/// declares for its arguments and outputs, so it must agree with the tag of
/// every value produced by [`Typed::into_value`].
pub trait Typed: Sized + Send + Sync + 'static {
	/// Returns the tag for this Rust type.
	fn type_tag() -> TypeTag;

	/// Wraps the value.
	fn into_value(self) -> Value;

	/// Extracts the value, returning `None` if the tag doesn't match.
	fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_typed_scalar {
	($($ty:ty => $variant:ident, $tag:ident;)*) => {
		$(
			impl Typed for $ty {
				fn type_tag() -> TypeTag {
					TypeTag::$tag
				}

				fn into_value(self) -> Value {
					Value::$variant(self)
				}

				fn from_value(value: Value) -> Option<Self> {
					match value {
						Value::$variant(v) => Some(v),
						_ => None,
					}
				}
			}
		)*
	};
}

impl_typed_scalar! {
	bool => Bool, BOOL;
	i8 => I8, I8;
	i16 => I16, I16;
	i32 => I32, I32;
	i64 => I64, I64;
	isize => Isize, ISIZE;
	u8 => U8, U8;
	u16 => U16, U16;
	u32 => U32, U32;
	u64 => U64, U64;
	usize => Usize, USIZE;
	f32 => F32, F32;
	f64 => F64, F64;
	String => String, STRING;
}

/// Opaque payload typed as the generic `any` token.
#[derive(Clone)]
pub struct AnyValue(pub Arc<dyn Any + Send + Sync>);

impl AnyValue {
	pub fn new<T: Any + Send + Sync>(data: T) -> Self {
		Self(Arc::new(data))
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.downcast_ref::<T>()
	}
}

impl std::fmt::Debug for AnyValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("AnyValue(..)")
	}
}

impl Typed for AnyValue {
	fn type_tag() -> TypeTag {
		TypeTag::ANY
	}

	fn into_value(self) -> Value {
		Value::Any(self.0)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Any(data) => Some(Self(data)),
			_ => None,
		}
	}
}

/// Implements [`Typed`] and [`Outputs`](crate::Outputs) for an extension type
/// under an interned name.
///
/// The type must be `Clone + Send + Sync + 'static`. The name must not be a
/// builtin tag name:
///
/// ```
/// #[derive(Clone)]
/// struct Celsius(f64);
/// morph_primitives::typed_custom!(Celsius, "units.Celsius");
///
/// use morph_primitives::Typed;
/// assert_eq!(Celsius::type_tag().name(), "units.Celsius");
/// ```
///
/// ```compile_fail
/// #[derive(Clone)]
/// struct Money(i64);
/// morph_primitives::typed_custom!(Money, "i64");
/// ```
#[macro_export]
macro_rules! typed_custom {
	($ty:ty, $name:literal) => {
		const _: () = ::std::assert!(
			!$crate::tag::is_builtin_name($name),
			"extension type name collides with a builtin tag"
		);

		impl $crate::Typed for $ty {
			fn type_tag() -> $crate::TypeTag {
				static TAG: ::std::sync::OnceLock<$crate::TypeTag> = ::std::sync::OnceLock::new();
				*TAG.get_or_init(|| $crate::TypeTag::intern($name))
			}

			fn into_value(self) -> $crate::Value {
				$crate::Value::custom(<Self as $crate::Typed>::type_tag(), self)
			}

			fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
				if value.tag() != <Self as $crate::Typed>::type_tag() {
					return ::std::option::Option::None;
				}
				value.into_custom::<$ty>()
			}
		}

		impl $crate::Outputs for $ty {
			fn output_tags() -> $crate::Tags {
				$crate::Tags::from_slice(&[<Self as $crate::Typed>::type_tag()])
			}

			fn into_values(self) -> ::std::vec::Vec<$crate::Value> {
				::std::vec![<Self as $crate::Typed>::into_value(self)]
			}
		}
	};
}
