use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::TypeTag;

/// Error payload carried by [`Value::Error`].
pub type SharedError = Arc<dyn std::error::Error + Send + Sync>;

/// A runtime value with an explicit type tag.
///
/// Scalar variants map one-to-one onto the builtin tags. Extension types travel
/// as [`Value::Custom`], carrying their interned tag next to the payload.
#[derive(Clone)]
pub enum Value {
	Nil,
	Bool(bool),
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	Isize(isize),
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	Usize(usize),
	F32(f32),
	F64(f64),
	String(String),
	/// Error-like status value.
	Error(SharedError),
	/// Opaque payload typed as `any`.
	Any(Arc<dyn Any + Send + Sync>),
	/// Payload of an interned extension type.
	Custom {
		tag: TypeTag,
		data: Arc<dyn Any + Send + Sync>,
	},
}

impl Value {
	/// Returns the tag of this value.
	pub fn tag(&self) -> TypeTag {
		match self {
			Value::Nil => TypeTag::NIL,
			Value::Bool(_) => TypeTag::BOOL,
			Value::I8(_) => TypeTag::I8,
			Value::I16(_) => TypeTag::I16,
			Value::I32(_) => TypeTag::I32,
			Value::I64(_) => TypeTag::I64,
			Value::Isize(_) => TypeTag::ISIZE,
			Value::U8(_) => TypeTag::U8,
			Value::U16(_) => TypeTag::U16,
			Value::U32(_) => TypeTag::U32,
			Value::U64(_) => TypeTag::U64,
			Value::Usize(_) => TypeTag::USIZE,
			Value::F32(_) => TypeTag::F32,
			Value::F64(_) => TypeTag::F64,
			Value::String(_) => TypeTag::STRING,
			Value::Error(_) => TypeTag::ERROR,
			Value::Any(_) => TypeTag::ANY,
			Value::Custom { tag, .. } => *tag,
		}
	}

	/// Wraps an error as an error-like value.
	pub fn error<E>(err: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Value::Error(Arc::new(err))
	}

	/// Wraps an extension payload under `tag`.
	pub fn custom<T: Any + Send + Sync>(tag: TypeTag, data: T) -> Self {
		Value::Custom {
			tag,
			data: Arc::new(data),
		}
	}

	pub fn is_nil(&self) -> bool {
		matches!(self, Value::Nil)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string slice if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the error payload if this is an `Error` variant.
	pub fn as_error(&self) -> Option<&SharedError> {
		match self {
			Value::Error(e) => Some(e),
			_ => None,
		}
	}

	/// Borrows the payload of a `Custom` or `Any` value as `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Value::Custom { data, .. } | Value::Any(data) => data.downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Extracts the payload of a `Custom` value, cloning it if it is shared.
	pub fn into_custom<T: Any + Send + Sync + Clone>(self) -> Option<T> {
		match self {
			Value::Custom { data, .. } => {
				let data = data.downcast::<T>().ok()?;
				Some(Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone()))
			}
			_ => None,
		}
	}

	/// Parses a textual literal into a value of the builtin `tag`.
	///
	/// Returns `None` for extension tags and for text that does not parse.
	pub fn parse_literal(tag: TypeTag, text: &str) -> Option<Self> {
		let value = match tag {
			TypeTag::NIL if text == "nil" => Value::Nil,
			TypeTag::BOOL => Value::Bool(text.parse().ok()?),
			TypeTag::I8 => Value::I8(text.parse().ok()?),
			TypeTag::I16 => Value::I16(text.parse().ok()?),
			TypeTag::I32 => Value::I32(text.parse().ok()?),
			TypeTag::I64 => Value::I64(text.parse().ok()?),
			TypeTag::ISIZE => Value::Isize(text.parse().ok()?),
			TypeTag::U8 => Value::U8(text.parse().ok()?),
			TypeTag::U16 => Value::U16(text.parse().ok()?),
			TypeTag::U32 => Value::U32(text.parse().ok()?),
			TypeTag::U64 => Value::U64(text.parse().ok()?),
			TypeTag::USIZE => Value::Usize(text.parse().ok()?),
			TypeTag::F32 => Value::F32(text.parse().ok()?),
			TypeTag::F64 => Value::F64(text.parse().ok()?),
			TypeTag::STRING => Value::String(text.to_owned()),
			_ => return None,
		};
		Some(value)
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Nil => f.write_str("Nil"),
			Value::String(v) => write!(f, "String({v:?})"),
			Value::Error(e) => write!(f, "Error({e})"),
			Value::Any(_) => f.write_str("Any(..)"),
			Value::Custom { tag, .. } => write!(f, "Custom({tag}, ..)"),
			other => write!(f, "{}({other})", other.tag()),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Nil => f.write_str("nil"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::I8(v) => write!(f, "{v}"),
			Value::I16(v) => write!(f, "{v}"),
			Value::I32(v) => write!(f, "{v}"),
			Value::I64(v) => write!(f, "{v}"),
			Value::Isize(v) => write!(f, "{v}"),
			Value::U8(v) => write!(f, "{v}"),
			Value::U16(v) => write!(f, "{v}"),
			Value::U32(v) => write!(f, "{v}"),
			Value::U64(v) => write!(f, "{v}"),
			Value::Usize(v) => write!(f, "{v}"),
			Value::F32(v) => write!(f, "{v}"),
			Value::F64(v) => write!(f, "{v}"),
			Value::String(v) => f.write_str(v),
			Value::Error(e) => write!(f, "{e}"),
			Value::Any(_) => f.write_str("<any>"),
			Value::Custom { tag, .. } => write!(f, "<{tag}>"),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Nil, Value::Nil) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::I8(a), Value::I8(b)) => a == b,
			(Value::I16(a), Value::I16(b)) => a == b,
			(Value::I32(a), Value::I32(b)) => a == b,
			(Value::I64(a), Value::I64(b)) => a == b,
			(Value::Isize(a), Value::Isize(b)) => a == b,
			(Value::U8(a), Value::U8(b)) => a == b,
			(Value::U16(a), Value::U16(b)) => a == b,
			(Value::U32(a), Value::U32(b)) => a == b,
			(Value::U64(a), Value::U64(b)) => a == b,
			(Value::Usize(a), Value::Usize(b)) => a == b,
			(Value::F32(a), Value::F32(b)) => a == b,
			(Value::F64(a), Value::F64(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Error(a), Value::Error(b)) => Arc::ptr_eq(a, b),
			(Value::Any(a), Value::Any(b)) => Arc::ptr_eq(a, b),
			(Value::Custom { tag: ta, data: a }, Value::Custom { tag: tb, data: b }) => {
				ta == tb && Arc::ptr_eq(a, b)
			}
			_ => false,
		}
	}
}
