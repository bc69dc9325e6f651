//! promptsmith command-line interface.

mod report;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use promptsmith_core::pipeline::{ExecutionMode, OptimizationRequest};
use promptsmith_core::{Catalog, Domain, Intent, OptimizationLevel, Optimizer};

#[derive(Parser)]
#[command(name = "promptsmith", about = "Deterministic prompt analysis and rewriting", version)]
struct Cli {
    /// Catalog file (.json or .yaml); the builtin catalog when omitted
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Emit machine-readable JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a prompt against the quality rubric
    Analyze {
        prompt: String,

        #[arg(long, default_value = "auto")]
        domain: Domain,

        #[arg(long, default_value = "balanced")]
        level: OptimizationLevel,

        /// Use the extended agentic rubric
        #[arg(long)]
        agentic: bool,
    },

    /// Rewrite a prompt to raise its rubric score
    Optimize {
        prompt: String,

        #[arg(long, default_value = "auto")]
        domain: Domain,

        #[arg(long, default_value = "balanced")]
        level: OptimizationLevel,

        /// Use the extended agentic passes
        #[arg(long)]
        agentic: bool,
    },

    /// Process a request end to end with automatic mode selection
    Run {
        prompt: String,

        #[arg(long, default_value = "auto")]
        domain: Domain,

        #[arg(long, default_value = "balanced")]
        level: OptimizationLevel,

        #[arg(long)]
        template: Option<String>,

        /// Template variable, repeatable: -v name=value
        #[arg(short = 'v', long = "var", value_parser = parse_key_value)]
        variables: Vec<(String, String)>,
    },

    /// List catalog templates
    Templates {
        #[arg(long)]
        domain: Option<Domain>,

        #[arg(long)]
        intent: Option<Intent>,
    },

    /// Fill a template with variables
    Fill {
        template_id: String,

        /// Template variable, repeatable: -v name=value
        #[arg(short = 'v', long = "var", value_parser = parse_key_value)]
        variables: Vec<(String, String)>,

        /// Keep unresolved placeholders and list missing variables
        #[arg(long)]
        partial: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got {raw:?}")),
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Catalog::from_yaml_file(path),
        _ => Catalog::from_json_file(path),
    }
    .with_context(|| format!("failed to load catalog from {}", path.display()))?;

    debug!(path = %path.display(), "catalog loaded");
    Ok(catalog)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = Optimizer::new(load_catalog(cli.catalog.as_ref())?);

    match cli.command {
        Command::Analyze {
            prompt,
            domain,
            level,
            agentic,
        } => {
            if agentic {
                let result = service.analyze_agentic(&prompt);
                if cli.json {
                    print_json(&result)?;
                } else {
                    println!("{}", report::agentic_analysis(&result));
                }
            } else {
                let result = service.analyze(&prompt, domain, level);
                if cli.json {
                    print_json(&result)?;
                } else {
                    println!("{}", report::analysis(&result));
                }
            }
        }

        Command::Optimize {
            prompt,
            domain,
            level,
            agentic,
        } => {
            if agentic {
                let analysis = service.analyze_agentic(&prompt);
                let result = service.optimize_agentic(&analysis);
                if cli.json {
                    print_json(&result)?;
                } else {
                    println!("{}", report::agentic_optimization(&result));
                }
            } else {
                let analysis = service.analyze(&prompt, domain, level);
                let result = service.optimize(&analysis);
                if cli.json {
                    print_json(&result)?;
                } else {
                    println!("{}", report::optimization(&result));
                }
            }
        }

        Command::Run {
            prompt,
            domain,
            level,
            template,
            variables,
        } => {
            let request = OptimizationRequest {
                prompt,
                domain,
                level,
                mode: ExecutionMode::Auto,
                template_id: template,
                template_variables: variables.into_iter().collect(),
            };
            let response = service.process_request(&request);
            if cli.json {
                print_json(&response)?;
            } else {
                println!("{}", report::response(&response));
            }
            if !response.success {
                std::process::exit(1);
            }
        }

        Command::Templates { domain, intent } => {
            let templates: Vec<_> = service
                .catalog()
                .templates()
                .iter()
                .filter(|t| domain.map_or(true, |d| t.domain == d))
                .filter(|t| intent.map_or(true, |i| t.intent == i))
                .collect();

            if cli.json {
                print_json(&templates)?;
            } else {
                for t in templates {
                    println!("{} (ID: {}, {}/{}, {})", t.name, t.id, t.domain, t.intent, t.complexity);
                    if !t.description.is_empty() {
                        println!("    {}", t.description);
                    }
                }
            }
        }

        Command::Fill {
            template_id,
            variables,
            partial,
        } => {
            let template = service
                .catalog()
                .template(&template_id)
                .with_context(|| format!("unknown template: {template_id}"))?;
            let values: HashMap<String, String> = variables.into_iter().collect();

            if partial {
                let (filled, missing) = template.fill_partial(&values);
                if cli.json {
                    print_json(&serde_json::json!({
                        "filled": filled,
                        "missing_variables": missing,
                    }))?;
                } else {
                    println!("{filled}");
                    if !missing.is_empty() {
                        eprintln!("누락된 변수: {}", missing.join(", "));
                    }
                }
            } else {
                match template.fill(&values) {
                    Some(filled) => println!("{filled}"),
                    None => {
                        let (_, missing) = template.fill_partial(&values);
                        bail!("missing variables: {}", missing.join(", "));
                    }
                }
            }
        }
    }

    Ok(())
}
