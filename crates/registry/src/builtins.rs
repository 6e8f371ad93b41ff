//! Primitive conversion table loaded by [`Registry::with_builtins`](crate::Registry::with_builtins).
//!
//! Narrowing and sign-changing conversions report overflow through a trailing
//! `bool`; parsers report through `Result`.

use crate::core::entry::Converter;

/// Narrowing `from -> to` that fails when the value does not fit.
macro_rules! checked {
	($from:ty => $to:ty) => {
		Converter::new(|i: $from| match <$to>::try_from(i) {
			Ok(v) => (v, true),
			Err(_) => (i as $to, false),
		})
	};
}

/// Lossless `from -> to`.
macro_rules! widen {
	($from:ty => $to:ty) => {
		Converter::new(|i: $from| <$to>::from(i))
	};
}

pub fn all() -> Vec<Converter> {
	vec![
		checked!(i8 => u8),
		checked!(u8 => i8),
		checked!(i64 => u64),
		checked!(u64 => i64),
		widen!(i8 => i16),
		widen!(i16 => i32),
		widen!(i32 => i64),
		Converter::new(|i: isize| i as i64),
		checked!(i64 => i32),
		checked!(i64 => isize),
		checked!(i32 => i16),
		checked!(i16 => i8),
		widen!(u8 => u16),
		widen!(u16 => u32),
		widen!(u32 => u64),
		checked!(u64 => u32),
		checked!(u64 => usize),
		checked!(u32 => u16),
		checked!(u16 => u8),
		Converter::new(|i: i64| i.to_string()),
		Converter::new(|i: u64| i.to_string()),
		Converter::new(|s: String| s.parse::<isize>()),
		Converter::new(|s: String| s.parse::<i64>()),
		Converter::new(|s: String| s.parse::<u64>()),
		Converter::new(|s: String| s.parse::<f64>()),
		Converter::new(|s: String| s.parse::<bool>()),
	]
}

#[cfg(test)]
mod tests {
	use morph_primitives::{TypeTag, Value};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use crate::Registry;

	#[test]
	fn table_registers_cleanly() {
		let registry = Registry::new();
		assert_eq!(registry.register(super::all()).unwrap(), 26);
		assert!(registry.contains("func(i8) u8"));
		assert!(registry.contains("func(String) isize"));
		assert!(registry.contains("func(u64) String"));
	}

	#[rstest]
	#[case(TypeTag::U8, Value::I8(1), Some(Value::U8(1)))]
	#[case(TypeTag::U8, Value::I8(-1), None)]
	#[case(TypeTag::I8, Value::U8(200), None)]
	#[case(TypeTag::I64, Value::U64(u64::MAX), None)]
	#[case(TypeTag::U32, Value::U64(7), Some(Value::U32(7)))]
	#[case(TypeTag::I64, Value::Isize(-3), Some(Value::I64(-3)))]
	#[case(TypeTag::STRING, Value::I64(-3), Some(Value::String("-3".into())))]
	fn direct_entries(#[case] target: TypeTag, #[case] input: Value, #[case] expected: Option<Value>) {
		let registry = Registry::with_builtins();
		let out = registry.convert(target, vec![input]);
		match expected {
			Some(v) => assert_eq!(out.unwrap(), v),
			None => assert!(out.unwrap_err().is_conversion_failed()),
		}
	}
}
