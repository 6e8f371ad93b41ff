//! `morph` binary.
//!
//! Runs conversions against the default registry, or against a registry built
//! from `--config`.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use morph_registry::{Registry, RegistryConfig};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let owned;
	let registry: &Registry = match &cli.config {
		Some(path) => {
			let config = RegistryConfig::load(path)?;
			tracing::debug!(path = %path.display(), ?config, "loaded registry config");
			owned = Registry::with_config(config);
			&owned
		}
		None => morph_registry::db::get(),
	};

	match cli.command {
		Command::Convert { to, args } => {
			let out = registry.convert(to, args).with_context(|| format!("converting to {to}"))?;
			println!("{out}");
		}
		Command::Resolve { to, args } => {
			let entry = registry
				.resolve(to, &args)
				.with_context(|| format!("no conversion to {to} from {args:?}"))?;
			if entry.is_synthetic() {
				for link in entry.chain() {
					println!("{}", link.entry.label());
				}
			} else {
				println!("{}", entry.label());
			}
		}
		Command::Keys => {
			for key in registry.keys() {
				println!("{key}");
			}
		}
	}
	Ok(())
}
