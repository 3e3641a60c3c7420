use anyhow::{Context, bail};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;
use crate::schema::{SchemaError, SchemaRegistry};

#[derive(Debug, Serialize)]
struct SchemaListResponse {
    schemas: Vec<&'static str>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct LineProblem {
    line: usize,
    errors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    schema: String,
    checked: usize,
    invalid: Vec<LineProblem>,
}

/// Handle `ortho schema [TYPE] [--list] [--check FILE]`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new()?;

    if args.list {
        return output(
            &SchemaListResponse {
                schemas: registry.list(),
            },
            flags.format,
        );
    }

    if let Some(path) = &args.check {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let response = check_lines(&registry, &args.type_name, &contents)?;
        let invalid = response.invalid.len();
        output(&response, flags.format)?;
        if invalid > 0 {
            bail!("{invalid} of {} lines do not match {}", response.checked, args.type_name);
        }
        return Ok(());
    }

    output(registry.get(&args.type_name)?, flags.format)
}

fn check_lines(
    registry: &SchemaRegistry,
    name: &str,
    contents: &str,
) -> Result<CheckResponse, SchemaError> {
    registry.get(name)?;

    let mut checked = 0;
    let mut invalid = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        checked += 1;
        let problem = match serde_json::from_str::<serde_json::Value>(line) {
            Ok(value) => match registry.validate(name, &value) {
                Ok(()) => None,
                Err(SchemaError::ValidationFailed { errors }) => Some(errors),
                Err(other) => return Err(other),
            },
            Err(e) => Some(vec![format!("not JSON: {e}")]),
        };
        if let Some(errors) = problem {
            invalid.push(LineProblem {
                line: index + 1,
                errors,
            });
        }
    }

    Ok(CheckResponse {
        schema: name.to_string(),
        checked,
        invalid,
    })
}
