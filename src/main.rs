use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use remap_theme::config::{LoadedConfig, load_config};
use remap_theme::engine::{LabelFn, Span, StyledText};
use remap_theme::hooks::LifecycleHook;
use remap_theme::resource::ResourceAddress;
use remap_theme::rules::RuleTable;
use remap_theme::session::{Session, ViewId};

#[derive(Parser)]
#[command(name = "remap-theme")]
#[command(
	author,
	version,
	about = "Remote-aware status label and style remapping for editor views"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},

	/// Show how a view of PATH would be decorated
	Preview {
		/// Resource path, e.g. /ssh:root@host:/etc/hosts
		path: String,

		/// Baseline buffer label (defaults to the last path component)
		#[arg(long)]
		label: Option<String>,

		/// Lifecycle hook that triggers the pass
		#[arg(long, default_value = "resource-opened")]
		hook: LifecycleHook,

		/// Preview with remapping turned off
		#[arg(long)]
		disabled: bool,

		/// Config file to use instead of the user config
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective configuration
	Show {
		/// Config file to use instead of the user config
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
	/// Check the config for errors without decorating anything
	Validate {
		/// Config file to use instead of the user config
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	let filter = tracing_subscriber::EnvFilter::try_from_env("REMAP_THEME_LOG")
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Config { action } => match action {
			ConfigAction::Show { config } => handle_config_show(config.as_deref()),
			ConfigAction::Validate { config } => handle_config_validate(config.as_deref()),
		},
		Commands::Preview {
			path,
			label,
			hook,
			disabled,
			config,
		} => handle_preview(&path, label, hook, disabled, config.as_deref()),
	}
}

fn source_name(loaded: &LoadedConfig) -> String {
	match loaded.path {
		Some(ref path) => path.display().to_string(),
		None => "(built-in defaults)".to_string(),
	}
}

fn handle_config_show(config_path: Option<&Path>) -> Result<ExitCode> {
	let loaded = load_config(config_path).context("Failed to load configuration")?;
	let config = &loaded.config;
	let registry = config.build_registry();
	let rules = config.effective_rules(&registry);

	println!("# Source: {}", source_name(&loaded));
	println!("# enabled: {}", config.enabled);
	if config.rules.is_some() {
		println!("# rules: {}", rules.len());
	} else {
		println!("# rules: {} (built-in)", rules.len());
	}
	println!();

	for (i, rule) in rules.iter().enumerate() {
		println!("  Rule {}:", i + 1);
		if let Some(ref pattern) = rule.host_pattern {
			println!("    host_pattern: {}", pattern);
		}
		if let Some(ref pattern) = rule.user_pattern {
			println!("    user_pattern: {}", pattern);
		}
		for style_override in &rule.overrides {
			println!(
				"    override: {} => {}",
				style_override.style, style_override.attributes
			);
		}
		println!();
	}

	if !config.styles.is_empty() {
		println!("Styles:");
		for (name, attributes) in &config.styles {
			println!("  {}: {}", name, attributes);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(config_path: Option<&Path>) -> Result<ExitCode> {
	let loaded = match load_config(config_path) {
		Ok(loaded) => loaded,
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			return Ok(ExitCode::FAILURE);
		}
	};

	let registry = loaded.config.build_registry();
	match RuleTable::compile(&loaded.config.effective_rules(&registry)) {
		Ok(table) => {
			println!(
				"Configuration is valid: {} ({} rules)",
				source_name(&loaded),
				table.len()
			);
			for rule in table.iter() {
				for style_override in &rule.rule.overrides {
					if !registry.contains(&style_override.style) {
						println!(
							"  warning: style '{}' is not defined and will be skipped",
							style_override.style
						);
					}
					if style_override.attributes.is_empty() {
						println!(
							"  warning: override of '{}' sets no attributes",
							style_override.style
						);
					}
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_preview(
	path: &str,
	label: Option<String>,
	hook: LifecycleHook,
	disabled: bool,
	config_path: Option<&Path>,
) -> Result<ExitCode> {
	let loaded = load_config(config_path).context("Failed to load configuration")?;
	let mut session = Session::from_config(&loaded.config).context("Failed to compile rules")?;
	if disabled {
		session.set_enabled(false);
	}

	let label_text = label.unwrap_or_else(|| default_label(path).to_string());
	let buffer_label: LabelFn = Arc::new(move |_: &ResourceAddress| StyledText::plain(&label_text));
	let remote_indicator: LabelFn = Arc::new(|address: &ResourceAddress| {
		let span = if address.is_remote() {
			Span::plain("@").with_property("help", format!("Remote: {}", address))
		} else {
			Span::plain("-").with_property("help", "Local")
		};
		StyledText::from(span)
	});

	let view_id = ViewId(0);
	let mut decoration = session.open_view(view_id, path, buffer_label, remote_indicator);
	if hook != LifecycleHook::ResourceOpened
		&& let Some(redecorated) = session.dispatch(view_id, hook, path)
	{
		decoration = redecorated;
	}

	let view = session
		.view(view_id)
		.ok_or_else(|| anyhow::anyhow!("View disappeared during preview"))?;

	println!("address: {}", view.address());
	println!("label: {}", decoration.label);
	println!("label markup: {}", decoration.label.markup());
	println!("indicator: {}", decoration.indicator);
	println!("indicator markup: {}", decoration.indicator.markup());
	println!("overrides: {}", view.styles().active_count());
	for style in view.styles().overridden_styles() {
		if let Some(resolved) = view.styles().resolve(style) {
			println!("  {}: {}", style, resolved);
		}
	}

	Ok(ExitCode::SUCCESS)
}

/// Last non-empty path component, or the whole path.
fn default_label(path: &str) -> &str {
	path.rsplit(['/', ':'])
		.find(|part| !part.is_empty())
		.unwrap_or(path)
}
