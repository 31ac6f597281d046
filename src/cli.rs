//! Minimal CLI: load schema declarations → (list | build a record)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::registry::SchemaRegistry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// register schemas from JSON declaration files, then list them or build a record
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// more logging (-v: info, -vv: debug, -vvv: trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print every registered schema with its setter names
    Schemas(SchemasOut),
    /// chain setters on one schema and print the built record
    Build(BuildOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema files. May be literal paths or quoted glob patterns.
    ///
    /// Each file is a JSON object mapping schema name → array of field keys.
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SchemasOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct BuildOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// registered schema to build
    #[arg(long)]
    schema: String,

    /// `key=value` (or `$key=value`), applied in order; values parse as JSON, else as a string
    #[arg(long = "set", value_parser = parse_assignment)]
    set: Vec<(String, Value)>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// On-disk schema declarations: `{ "user": ["name", "age"] }`.
///
/// Entries stay in file order and a repeated name is kept as a second entry, so
/// registration (not the JSON reader) decides what a duplicate means.
#[derive(Debug, Default)]
pub struct SchemaFile(pub Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for SchemaFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DeclarationsVisitor;

        impl<'de> Visitor<'de> for DeclarationsVisitor {
            type Value = SchemaFile;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object mapping schema names to arrays of field keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SchemaFile, A::Error> {
                let mut out = Vec::new();
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    out.push(entry);
                }
                Ok(SchemaFile(out))
            }
        }

        deserializer.deserialize_map(DeclarationsVisitor)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_registry(&self) -> Result<SchemaRegistry> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .map_err(|error| anyhow::anyhow!("failed to resolve input file paths: {error}"))?;
        let mut registry = SchemaRegistry::new();
        for source_path in source_paths {
            load_schema_file(&mut registry, &source_path)?;
        }
        Ok(registry)
    }
}

/// Register every schema declared in `path`.
pub fn load_schema_file(registry: &mut SchemaRegistry, path: &Path) -> Result<()> {
    let source_path_str = path.to_string_lossy().to_string();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file ({source_path_str})"))?;
    let declarations = crate::path_de::from_str_with_path::<SchemaFile>(&source)
        .with_context(|| format!("failed to parse schema file ({source_path_str})"))?;
    for (name, keys) in declarations.0 {
        registry
            .register(name, keys)
            .with_context(|| format!("in schema file ({source_path_str})"))?;
    }
    tracing::info!(path = %source_path_str, schemas = registry.len(), "loaded schema file");
    Ok(())
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schemas(target) => {
                let registry = target.input_settings.load_registry()?;
                let listing = registry
                    .definitions()
                    .map(|def| {
                        serde_json::json!({
                            "name": def.name(),
                            "keys": def.keys().collect::<Vec<_>>(),
                            "setters": def.setter_names(),
                        })
                    })
                    .collect::<Vec<_>>();
                let src = serde_json::to_string_pretty(&listing)?;
                write_output(target.out.as_deref(), &src)
            }
            Command::Build(target) => {
                let registry = target.input_settings.load_registry()?;
                let record = build_record(&registry, &target.schema, &target.set)?;
                let src = serde_json::to_string_pretty(&record)?;
                write_output(target.out.as_deref(), &src)
            }
        }
    }
}

/// Chain `assignments` onto a fresh builder for `schema` and build the record.
pub fn build_record(
    registry: &SchemaRegistry,
    schema: &str,
    assignments: &[(String, Value)],
) -> Result<crate::Record> {
    let mut builder = registry.get(schema)?;
    for (key, value) in assignments {
        builder = if key.starts_with(crate::SETTER_SIGIL) {
            builder.invoke(key, value.clone())?
        } else {
            builder.set(key, value.clone())?
        };
    }
    Ok(builder.build())
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected key=value, got `{raw}`"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    let value = serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{src}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
