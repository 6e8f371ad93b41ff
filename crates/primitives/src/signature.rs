use std::fmt;

use smallvec::SmallVec;

use crate::{TypeTag, Value};

/// Inline storage for argument and output tag lists.
pub type Tags = SmallVec<[TypeTag; 4]>;

/// Argument and output tags of a callable, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
	pub args: Tags,
	pub outs: Tags,
}

impl Signature {
	pub fn new(args: impl IntoIterator<Item = TypeTag>, outs: impl IntoIterator<Item = TypeTag>) -> Self {
		Self {
			args: args.into_iter().collect(),
			outs: outs.into_iter().collect(),
		}
	}

	/// Splits off a trailing `bool`/`error` output.
	///
	/// Returns the primary outputs and the status tag, if any.
	pub fn split_status(&self) -> (&[TypeTag], Option<TypeTag>) {
		match self.outs.split_last() {
			Some((last, primary)) if last.is_status() => (primary, Some(*last)),
			_ => (self.outs.as_slice(), None),
		}
	}

	/// Renders `func[ name](a, b) r` or `func[ name](a) (r1, r2)`.
	///
	/// With no outputs the rendering ends at the closing parenthesis.
	pub fn render(name: Option<&str>, args: &[TypeTag], outs: &[TypeTag]) -> String {
		let mut s = String::from("func");
		if let Some(name) = name.filter(|n| !n.is_empty()) {
			s.push(' ');
			s.push_str(name);
		}
		s.push('(');
		push_joined(&mut s, args);
		s.push(')');
		match outs {
			[] => {}
			[one] => {
				s.push(' ');
				s.push_str(one.name());
			}
			many => {
				s.push_str(" (");
				push_joined(&mut s, many);
				s.push(')');
			}
		}
		s
	}
}

fn push_joined(s: &mut String, tags: &[TypeTag]) {
	for (i, tag) in tags.iter().enumerate() {
		if i > 0 {
			s.push_str(", ");
		}
		s.push_str(tag.name());
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&Signature::render(None, &self.args, &self.outs))
	}
}

/// Returns the tag of a value.
pub fn signature_of(value: &Value) -> TypeTag {
	value.tag()
}

/// Returns the tags of a value list, in order.
pub fn signatures_of(values: &[Value]) -> Tags {
	values.iter().map(Value::tag).collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(&[TypeTag::I8], &[TypeTag::U8], "func(i8) u8")]
	#[case(&[TypeTag::STRING, TypeTag::STRING], &[TypeTag::STRING], "func(String, String) String")]
	#[case(&[TypeTag::U64], &[TypeTag::U32, TypeTag::BOOL], "func(u64) (u32, bool)")]
	#[case(&[], &[], "func()")]
	#[case(&[TypeTag::ANY], &[], "func(any)")]
	fn render_shapes(#[case] args: &[TypeTag], #[case] outs: &[TypeTag], #[case] expected: &str) {
		assert_eq!(Signature::render(None, args, outs), expected);
		assert_eq!(Signature::new(args.iter().copied(), outs.iter().copied()).to_string(), expected);
	}

	#[test]
	fn render_named() {
		let s = Signature::render(Some("atoi"), &[TypeTag::STRING], &[TypeTag::ISIZE]);
		assert_eq!(s, "func atoi(String) isize");
		assert_eq!(Signature::render(Some(""), &[TypeTag::STRING], &[]), "func(String)");
	}

	#[rstest]
	#[case(&[TypeTag::U8, TypeTag::BOOL], &[TypeTag::U8], Some(TypeTag::BOOL))]
	#[case(&[TypeTag::I64, TypeTag::ERROR], &[TypeTag::I64], Some(TypeTag::ERROR))]
	#[case(&[TypeTag::BOOL], &[], Some(TypeTag::BOOL))]
	#[case(&[TypeTag::U8, TypeTag::U16], &[TypeTag::U8, TypeTag::U16], None)]
	#[case(&[], &[], None)]
	fn split_status_trailing(
		#[case] outs: &[TypeTag],
		#[case] primary: &[TypeTag],
		#[case] status: Option<TypeTag>,
	) {
		let sig = Signature::new([TypeTag::STRING], outs.iter().copied());
		assert_eq!(sig.split_status(), (primary, status));
	}

	#[test]
	fn signatures_of_values() {
		let tags = signatures_of(&[Value::I8(1), Value::String("a".into()), Value::Nil]);
		assert_eq!(tags.as_slice(), &[TypeTag::I8, TypeTag::STRING, TypeTag::NIL]);
	}
}
