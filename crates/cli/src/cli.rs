use std::path::PathBuf;

use clap::{Parser, Subcommand};
use morph_primitives::{TypeTag, Value};

#[derive(Parser, Debug)]
#[command(name = "morph")]
#[command(about = "Convert values through the morph conversion registry")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Registry config (TOML)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Convert arguments into a value of the target type
	Convert {
		/// Target type name (e.g. i8, u64, String)
		#[arg(long, short = 't', value_parser = parse_tag)]
		to: TypeTag,
		/// Arguments as `type:literal` (e.g. String:10, u8:200)
		#[arg(required = true, value_parser = parse_arg)]
		args: Vec<Value>,
	},
	/// Show the converter chain that would serve a request
	Resolve {
		/// Target type name
		#[arg(long, short = 't', value_parser = parse_tag)]
		to: TypeTag,
		/// Argument type names, in call order
		#[arg(required = true, value_parser = parse_tag)]
		args: Vec<TypeTag>,
	},
	/// List registered converter keys
	Keys,
}

pub fn parse_tag(name: &str) -> Result<TypeTag, String> {
	TypeTag::lookup(name).ok_or_else(|| format!("unknown type `{name}`"))
}

pub fn parse_arg(input: &str) -> Result<Value, String> {
	let (tag, literal) = input
		.split_once(':')
		.ok_or_else(|| format!("expected `type:literal`, got `{input}`"))?;
	let tag = parse_tag(tag)?;
	Value::parse_literal(tag, literal).ok_or_else(|| format!("`{literal}` is not a valid {tag}"))
}
