//! `apiconfig` command line tool.
//!
//! Turns a YAPI export (or a single endpoint config) into a TypeScript module
//! of `apiConfig({...})` calls, and optionally response types and an OpenAPI
//! document.

use anyhow::{Context, Result, bail};
use apiconfig::generate::ts::TsModule;
use apiconfig::generate::types::TsTypes;
use apiconfig::yapi::{YapiGroup, parse_export};
use apiconfig::{ApiClient, ApiConfig};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
  /// YAPI interface export, one `apiConfig` per group.
  Yapi,
  /// A single `{ name: [verb, path] }` config, JSON or YAML.
  Config,
}

/// Generate `apiConfig` client modules.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
  /// Input file.
  #[arg(short, long)]
  in_file: PathBuf,

  /// TypeScript module to write, parent directories are created.
  #[arg(short, long)]
  out_file: PathBuf,

  /// Kind of input.
  #[arg(long, value_enum, default_value_t = Format::Yapi)]
  format: Format,

  /// Export name of the client when the input is a single config.
  #[arg(long, default_value = "api")]
  name: String,

  /// Module `apiConfig` is imported from.
  #[arg(long, default_value = "utils/api")]
  import_from: String,

  /// Also write response types of a YAPI export.
  #[arg(long)]
  types: Option<PathBuf>,

  /// Also write an OpenAPI document, YAML for `.yaml`/`.yml`, JSON otherwise.
  #[cfg(feature = "openapi")]
  #[arg(long)]
  openapi: Option<PathBuf>,

  /// Debug logging.
  #[arg(short, long)]
  verbose: bool,

  /// Only log errors.
  #[arg(short, long, conflicts_with = "verbose")]
  quiet: bool,
}

fn init_logger(verbose: bool, quiet: bool) {
  let filter = if verbose {
    EnvFilter::new("apiconfig=debug")
  } else if quiet {
    EnvFilter::new("apiconfig=error")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apiconfig=info"))
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
    .init();
}

/// Named configs with their docs, in output order.
struct Input {
  exports: Vec<(String, Option<String>, ApiConfig)>,
  /// Source groups of a YAPI export, empty for a single config.
  groups: Vec<YapiGroup>,
}

fn is_yaml(path: &Path) -> bool {
  matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"))
}

fn load(path: &Path, format: Format, name: &str) -> Result<Input> {
  if !path.is_file() {
    bail!("input `{}` is not a file", path.display());
  }
  let text = fs::read_to_string(path).with_context(|| format!("reading `{}`", path.display()))?;

  match format {
    Format::Config => {
      let config = if is_yaml(path) {
        ApiConfig::from_yaml_str(&text)?
      } else {
        ApiConfig::from_json_str(&text)?
      };
      ApiClient::from_config(&config)?;
      Ok(Input { exports: vec![(name.to_owned(), None, config)], groups: Vec::new() })
    }
    Format::Yapi => {
      let groups = parse_export(&text).context("parsing YAPI export")?;
      tracing::info!(groups = groups.len(), "loaded YAPI export");
      let mut exports = Vec::with_capacity(groups.len());
      for group in &groups {
        let mut config = group.to_config();
        for name in config.retain_supported() {
          tracing::warn!(group = %group.name, endpoint = %name, "skipping unsupported verb");
        }
        ApiClient::from_config(&config).with_context(|| format!("group `{}`", group.name))?;
        exports.push((group.name.clone(), group.desc.clone(), config));
      }
      Ok(Input { exports, groups })
    }
  }
}

fn render_ts(input: &Input, import_from: &str) -> Result<String> {
  let mut module = TsModule::new(import_from);
  for (name, docs, config) in &input.exports {
    tracing::debug!(export = %name, endpoints = config.len(), "rendering");
    module.export(name, docs.as_deref(), config).with_context(|| format!("exporting `{name}`"))?;
  }
  Ok(module.render())
}

fn write(path: &Path, contents: &str) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).with_context(|| format!("creating `{}`", parent.display()))?;
  }
  fs::write(path, contents).with_context(|| format!("writing `{}`", path.display()))?;
  tracing::info!(path = %path.display(), "written");
  Ok(())
}

fn write_types(path: &Path, input: &Input) -> Result<()> {
  let mut types = TsTypes::new();
  for group in &input.groups {
    types.add_group(group);
  }
  if types.is_empty() {
    tracing::warn!("no interface has a JSON response schema");
  }
  write(path, &types.render())
}

#[cfg(feature = "openapi")]
fn write_openapi(path: &Path, input: &Input) -> Result<()> {
  use apiconfig::generate::openapi::{ApiMeta, gen_openapi};

  let meta = ApiMeta { title: "API", version: env!("CARGO_PKG_VERSION"), docs: None };
  let groups = input.exports.iter().map(|(name, _, config)| (Some(name.as_str()), config));
  let api = gen_openapi(meta, groups)?;
  let contents =
    if is_yaml(path) { serde_yaml::to_string(&api)? } else { serde_json::to_string_pretty(&api)? };
  write(path, &contents)
}

#[cfg(feature = "openapi")]
fn maybe_write_openapi(args: &Args, input: &Input) -> Result<()> {
  match &args.openapi {
    Some(path) => write_openapi(path, input),
    None => Ok(()),
  }
}

#[cfg(not(feature = "openapi"))]
fn maybe_write_openapi(_args: &Args, _input: &Input) -> Result<()> {
  Ok(())
}

fn run(args: &Args) -> Result<()> {
  if args.types.is_some() && args.format != Format::Yapi {
    bail!("`--types` needs a YAPI export, response schemas only live there");
  }
  let input = load(&args.in_file, args.format, &args.name)?;
  let module = render_ts(&input, &args.import_from)?;
  write(&args.out_file, &module)?;
  if let Some(path) = &args.types {
    write_types(path, &input)?;
  }
  maybe_write_openapi(args, &input)
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_logger(args.verbose, args.quiet);
  run(&args)
}
