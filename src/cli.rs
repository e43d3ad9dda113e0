//! Minimal CLI: schema documents → (resolved field types | descriptor trees)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indexmap::IndexMap;

use schema_typer::{BaseType, Language, ModelReport, Resolver, SchemaDocument};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// resolve the field types declared by JSON schema documents for a target language
#[derive(Parser, Debug)]
#[command(name = "schema-typer", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// resolve every field of the given models to target-language types
    Resolve(ResolveOut),
    /// print the normalized property descriptors of the given models
    Describe(DescribeOut),
    /// print every target type table
    Languages,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ResolveOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// target language
    #[arg(long, short, value_enum)]
    lang: Language,

    /// also resolve every model reachable through `$ref`
    #[arg(long, default_value_t = false)]
    follow_refs: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct DescribeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// Output was written, but at least one field did not resolve.
    FieldErrors,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn paths(&self) -> Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<Outcome> {
        match &self.cmd {
            Command::Resolve(target) => {
                let roots = target.input_settings.paths()?;
                let resolver = Resolver::new();
                let models = schema_typer::resolve_models(&resolver, &roots, target.lang, target.follow_refs)?;
                tracing::info!(models = models.len(), lang = %target.lang, "resolved models");

                let rendered = match target.format {
                    OutputFormat::Json => serde_json::to_string_pretty(&models)?,
                    OutputFormat::Text => render_text(&models, target.out.is_none()),
                };
                write_output(target.out.as_deref(), &rendered)?;

                if models.iter().all(ModelReport::is_complete) {
                    Ok(Outcome::Clean)
                } else {
                    Ok(Outcome::FieldErrors)
                }
            }
            Command::Describe(target) => {
                let mut described = Vec::new();
                for path in target.input_settings.paths()? {
                    let document = SchemaDocument::load(&path)?;
                    described.push(serde_json::json!({
                        "path": document.path,
                        "title": document.title,
                        "properties": document.properties,
                    }));
                }
                write_output(target.out.as_deref(), &serde_json::to_string_pretty(&described)?)?;
                Ok(Outcome::Clean)
            }
            Command::Languages => {
                let tables: IndexMap<Language, IndexMap<BaseType, &str>> = Language::ALL
                    .into_iter()
                    .map(|lang| {
                        let table = lang.table();
                        let row = BaseType::ALL
                            .into_iter()
                            .map(|base| (base, table.spelling(base).as_str()))
                            .collect();
                        (lang, row)
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&tables)?);
                Ok(Outcome::Clean)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn render_text(models: &[ModelReport], colorize: bool) -> String {
    let mut out = String::new();
    for model in models {
        let owner = if model.type_name.is_empty() {
            model.path.display().to_string()
        } else {
            model.type_name.clone()
        };
        for field in &model.fields {
            let name = field.name.as_deref().unwrap_or("?");
            let line = match (&field.ty, &field.error) {
                (Some(ty), _) => format!("{owner}.{name}: {ty}"),
                (None, Some(error)) if colorize => format!("{owner}.{name}: {}", error.red()),
                (None, error) => format!("{owner}.{name}: <{}>", error.as_deref().unwrap_or("unresolved")),
            };
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{contents}");
            if !contents.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_typer::FieldReport;

    fn field(name: &str, ty: Option<&str>, error: Option<&str>) -> FieldReport {
        FieldReport {
            name: Some(name.into()),
            json_key: Some(name.into()),
            optional: false,
            mutable: false,
            description: None,
            ty: ty.map(Into::into),
            error: error.map(Into::into),
        }
    }

    #[test]
    fn text_lines_name_model_and_field() {
        let models = vec![ModelReport {
            title: Some("user".into()),
            type_name: "User".into(),
            path: PathBuf::from("user.json"),
            language: Language::Swift,
            fields: vec![
                field("id", Some("Int"), None),
                field("tags", None, Some("array property is missing `items`")),
            ],
        }];
        let text = render_text(&models, false);
        assert_eq!(text, "User.id: Int\nUser.tags: <array property is missing `items`>\n");
    }

    #[test]
    fn globs_expand_and_literals_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let found = resolve_file_path_patterns([pattern.as_str(), "literal.json"]).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[2], PathBuf::from("literal.json"));

        let none = format!("{}/*.yaml", dir.path().display());
        assert!(resolve_file_path_patterns([none]).is_err());
    }

    #[test]
    fn cli_parses_resolve_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "schema-typer", "resolve", "-i", "a.json", "b.json", "--lang", "ts", "--follow-refs", "--format", "text",
        ])
        .unwrap();
        match cli.cmd {
            Command::Resolve(target) => {
                assert_eq!(target.input_settings.input, ["a.json", "b.json"]);
                assert_eq!(target.lang, Language::TypeScript);
                assert!(target.follow_refs);
                assert_eq!(target.format, OutputFormat::Text);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
