use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Names of the builtin tags, indexed by their constant value.
const BUILTIN_NAMES: [&str; 17] = [
	"nil", "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32",
	"f64", "String", "error", "any",
];

/// Process-wide name table. Append-only; interned names live for the rest of the process.
struct Interner {
	names: Vec<&'static str>,
	by_name: FxHashMap<&'static str, u32>,
}

impl Interner {
	fn with_builtins() -> Self {
		let mut interner = Self {
			names: Vec::with_capacity(BUILTIN_NAMES.len()),
			by_name: FxHashMap::default(),
		};
		for name in BUILTIN_NAMES {
			interner.push(name);
		}
		interner
	}

	fn push(&mut self, name: &'static str) -> u32 {
		let id = self.names.len() as u32;
		self.names.push(name);
		self.by_name.insert(name, id);
		id
	}
}

/// Returns true if `name` is one of the builtin tag names.
///
/// Usable in const context, which is how [`typed_custom!`](crate::typed_custom)
/// rejects extension names that would alias a builtin tag.
pub const fn is_builtin_name(name: &str) -> bool {
	let name = name.as_bytes();
	let mut i = 0;
	while i < BUILTIN_NAMES.len() {
		let builtin = BUILTIN_NAMES[i].as_bytes();
		if builtin.len() == name.len() {
			let mut j = 0;
			while j < name.len() && builtin[j] == name[j] {
				j += 1;
			}
			if j == name.len() {
				return true;
			}
		}
		i += 1;
	}
	false
}

static INTERNER: LazyLock<RwLock<Interner>> = LazyLock::new(|| RwLock::new(Interner::with_builtins()));

/// Runtime type identity of a [`Value`](crate::Value).
///
/// A tag is a dense handle into the process-wide name table. Two tags are equal
/// exactly when their names are equal, so tags can be compared and hashed
/// without touching the table.
///
/// `nil`, `error` and `any` are literal tokens: they never expand into the
/// representation of whatever concrete value produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(u32);

impl TypeTag {
	/// The "no value" token.
	pub const NIL: Self = Self(0);
	pub const BOOL: Self = Self(1);
	pub const I8: Self = Self(2);
	pub const I16: Self = Self(3);
	pub const I32: Self = Self(4);
	pub const I64: Self = Self(5);
	pub const ISIZE: Self = Self(6);
	pub const U8: Self = Self(7);
	pub const U16: Self = Self(8);
	pub const U32: Self = Self(9);
	pub const U64: Self = Self(10);
	pub const USIZE: Self = Self(11);
	pub const F32: Self = Self(12);
	pub const F64: Self = Self(13);
	pub const STRING: Self = Self(14);
	/// Generic error-like token, used for trailing status outputs.
	pub const ERROR: Self = Self(15);
	/// Fully generic token.
	pub const ANY: Self = Self(16);

	/// Returns the tag for `name`, assigning a new one if the name is unseen.
	pub fn intern(name: &str) -> Self {
		if let Some(tag) = Self::lookup(name) {
			return tag;
		}
		let mut interner = INTERNER.write();
		// Another writer may have interned the name between the two locks.
		if let Some(&id) = interner.by_name.get(name) {
			return Self(id);
		}
		let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
		Self(interner.push(leaked))
	}

	/// Interns an extension type name.
	///
	/// Returns `None` for builtin names, so an extension type can never share a
	/// tag with a builtin one.
	pub fn intern_custom(name: &str) -> Option<Self> {
		(!is_builtin_name(name)).then(|| Self::intern(name))
	}

	/// Returns the tag for `name` if it has already been interned.
	pub fn lookup(name: &str) -> Option<Self> {
		INTERNER.read().by_name.get(name).copied().map(Self)
	}

	/// Returns the interned name.
	pub fn name(self) -> &'static str {
		INTERNER.read().names[self.0 as usize]
	}

	/// Returns true for tags that act as a trailing success indicator (`bool`, `error`).
	pub fn is_status(self) -> bool {
		self == Self::BOOL || self == Self::ERROR
	}

	/// Returns true for the fixed builtin tags.
	pub fn is_builtin(self) -> bool {
		(self.0 as usize) < BUILTIN_NAMES.len()
	}

	pub fn as_u32(self) -> u32 {
		self.0
	}
}

impl fmt::Debug for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeTag({})", self.name())
	}
}

impl fmt::Display for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
