//! Command-line arguments and command execution

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use linkexpr_application::variable_resolver::{CompletionEnumerator, PreviewRenderer, parse};
use linkexpr_application::{BuildContext, EvaluateField};
use linkexpr_domain::environment::{Owner, ResolutionContext, VariableScope};
use linkexpr_domain::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS, Diagnostic, EngineSettings, FieldValue,
    OperatingSystem, Segment, UnknownTokenPolicy, ValidationFailure, ValueType,
};
use linkexpr_infrastructure::{SnapshotRegistry, load_snapshot, to_json_stable};
use serde::Serialize;
use tracing::debug;

/// Resolve, validate and complete `{{TOKEN:KEY}}` link expressions.
#[derive(Parser, Debug)]
#[command(name = "linkexpr", version)]
pub struct Cli {
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split an expression into literal and placeholder segments.
    Parse {
        /// The raw expression.
        expression: String,
    },

    /// Render an expression, leaving unresolved placeholders visible.
    Preview {
        #[command(flatten)]
        context: ContextArgs,

        /// The raw expression.
        expression: String,
    },

    /// Validate a field value. Exits with status 1 if it cannot be saved.
    Validate {
        #[command(flatten)]
        context: ContextArgs,

        /// The raw field value.
        value: String,

        /// Declared type of the field (string, boolean, numeric, port).
        #[arg(long = "type", default_value_t = ValueType::String)]
        value_type: ValueType,

        /// Treat the value as plain text rather than a link expression.
        #[arg(long)]
        plain: bool,
    },

    /// List placeholders that can be inserted, optionally filtered by prefix.
    Complete {
        #[command(flatten)]
        context: ContextArgs,

        /// Prefix typed so far.
        #[arg(default_value = "")]
        prefix: String,
    },
}

/// Where the expression lives and how to resolve it.
#[derive(Args, Debug)]
pub struct ContextArgs {
    /// Snapshot file (.json, .yaml or .yml).
    #[arg(long, short, env = "LINKEXPR_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Instance owning the expression.
    #[arg(long, short, env = "LINKEXPR_INSTANCE")]
    pub instance: String,

    /// Process owning the expression.
    #[arg(long, short, env = "LINKEXPR_PROCESS")]
    pub process: Option<String>,

    /// Target operating system. Defaults to the host.
    #[arg(long = "os", env = "LINKEXPR_TARGET_OS")]
    pub target_os: Option<OperatingSystem>,

    /// Maximum nesting of values that contain placeholders.
    #[arg(long, env = "LINKEXPR_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum number of placeholders expanded for one expression.
    #[arg(long, env = "LINKEXPR_MAX_EXPANSIONS", default_value_t = DEFAULT_MAX_EXPANSIONS)]
    pub max_expansions: usize,

    /// Treatment of unknown tokens (diagnose, pass-through).
    #[arg(long, env = "LINKEXPR_UNKNOWN_TOKENS", default_value_t = UnknownTokenPolicy::Diagnose)]
    pub unknown_tokens: UnknownTokenPolicy,

    /// Expose this process's environment through `{{ENV:NAME}}`.
    #[arg(long)]
    pub inherit_env: bool,

    /// Extra `{{ENV:NAME}}` value as NAME=VALUE. Repeatable.
    #[arg(long = "env", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,
}

impl ContextArgs {
    /// Engine settings from the arguments.
    pub const fn settings(&self) -> EngineSettings {
        EngineSettings {
            max_depth: self.max_depth,
            max_expansions: self.max_expansions,
            unknown_tokens: self.unknown_tokens,
        }
    }

    /// Environment values exposed to the `ENV` token.
    pub fn environment(&self) -> VariableScope {
        let inherited: Vec<(String, String)> = if self.inherit_env {
            std::env::vars().collect()
        } else {
            Vec::new()
        };
        inherited.into_iter().chain(self.env.iter().cloned()).collect()
    }

    /// Loads the snapshot and builds the owner's resolution context.
    pub fn build(&self) -> Result<ResolutionContext> {
        let snapshot = load_snapshot(&self.snapshot)
            .with_context(|| format!("loading snapshot {}", self.snapshot.display()))?;
        let registry = SnapshotRegistry::new(snapshot).with_environment(self.environment());
        let owner = Owner {
            instance_id: self.instance.clone(),
            process_id: self.process.clone(),
        };
        let target_os = self.target_os.unwrap_or_else(OperatingSystem::current);
        debug!(instance = %owner.instance_id, %target_os, "building context");
        BuildContext::new(registry)
            .execute(&owner, target_os)
            .context("building resolution context")
    }
}

/// Parses `NAME=VALUE`.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{input}'")),
    }
}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    value: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    failures: &'a [ValidationFailure],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    diagnostics: &'a [Diagnostic],
}

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Parse { expression } => run_parse(&expression, cli.json),
        Command::Preview {
            context,
            expression,
        } => {
            let ctx = context.build()?;
            let preview = PreviewRenderer::new(&ctx)
                .with_settings(context.settings())
                .render(&expression);
            if cli.json {
                print!("{}", to_json_stable(&preview)?);
            } else {
                println!("{}", preview.value);
                for diagnostic in &preview.diagnostics {
                    eprintln!("warning: {diagnostic}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            context,
            value,
            value_type,
            plain,
        } => {
            let ctx = context.build()?;
            let field = FieldValue {
                raw: value,
                link_mode: !plain,
                value_type,
            };
            let evaluation = EvaluateField::new(&ctx)
                .with_settings(context.settings())
                .execute(&field);
            let valid = evaluation.is_valid();
            if cli.json {
                let output = ValidateOutput {
                    value: &evaluation.preview.value,
                    valid,
                    failures: &evaluation.validation.failures,
                    diagnostics: &evaluation.preview.diagnostics,
                };
                print!("{}", to_json_stable(&output)?);
            } else {
                println!("{}", evaluation.preview.value);
                if let Some(reason) = evaluation.validation.reason() {
                    eprintln!("invalid: {reason}");
                }
            }
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Complete { context, prefix } => {
            let ctx = context.build()?;
            let enumerator = CompletionEnumerator::new(&ctx);
            if cli.json {
                print!("{}", to_json_stable(&enumerator.filtered(&prefix))?);
            } else {
                for (category, candidates) in enumerator.grouped(&prefix) {
                    println!("{}:", category.display_name());
                    for candidate in candidates {
                        let mut line = format!("  {}", candidate.expression);
                        if let Some(value) = &candidate.value {
                            line.push_str(&format!(" = {value}"));
                        }
                        if candidate.shadowed {
                            line.push_str(" (shadowed)");
                        }
                        println!("{line}");
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_parse(expression: &str, json: bool) -> Result<ExitCode> {
    let parsed = parse(expression).map_err(|err| anyhow!(err))?;
    if json {
        print!("{}", to_json_stable(&parsed)?);
        return Ok(ExitCode::SUCCESS);
    }
    for segment in parsed.segments() {
        match segment {
            Segment::Literal(text) => println!("literal     {text:?}"),
            Segment::Placeholder(p) => {
                println!("placeholder {} token={:?} key={:?} kind={:?}", p.raw, p.token, p.key, p.kind);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
