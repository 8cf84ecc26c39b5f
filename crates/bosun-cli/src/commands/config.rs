//! `bosun config`: read and write user configuration keys

use async_trait::async_trait;
use bosun_core::{Command, CommandError, RunContext};
use clap::{Parser, Subcommand};
use serde_json::Value;

use super::parse_args;

/// Read and write configuration values
#[derive(Parser, Debug)]
#[command(name = "config")]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective value of a key (e.g. `github.user`)
    Get { key: String },

    /// Store a value in the user config file. JSON values are parsed,
    /// anything else is stored as a string.
    Set { key: String, value: String },

    /// Print the user config file location
    Path,
}

pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    async fn run(&self, ctx: &mut RunContext, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<ConfigArgs>("config", args)? else {
            return Ok(());
        };

        match args.action {
            ConfigAction::Get { key } => {
                let value = ctx
                    .config
                    .get(&key)
                    .ok_or_else(|| CommandError::new(format!("No value for `{key}`")))?;
                println!("{}", render(&value));
            }
            ConfigAction::Set { key, value } => {
                let failed = |e: bosun_core::Error| CommandError::new(e.to_string());
                ctx.config.set(&key, parse_value(&value)).map_err(failed)?;
                ctx.config.save().map_err(failed)?;
                ctx.log(&format!("Saved {key} to {}", ctx.paths.file.display()));
            }
            ConfigAction::Path => println!("{}", ctx.paths.file.display()),
        }
        Ok(())
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_parse_as_json_when_possible() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("7334"), json!(7334));
        assert_eq!(parse_value(r#"["a","b"]"#), json!(["a", "b"]));
        assert_eq!(parse_value("octo"), json!("octo"));
    }

    #[test]
    fn strings_render_unquoted() {
        assert_eq!(render(&json!("octo")), "octo");
        assert_eq!(render(&json!(3)), "3");
    }
}
