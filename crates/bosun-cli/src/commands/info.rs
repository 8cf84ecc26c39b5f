//! `bosun info`: what a run would operate on

use async_trait::async_trait;
use bosun_core::{Command, CommandError, RunContext};
use clap::Parser;
use colored::Colorize;

use super::parse_args;

/// Show workspace, team and configuration details
#[derive(Parser, Debug)]
#[command(name = "info")]
struct InfoArgs {
    /// Output as JSON for scripting
    #[arg(long)]
    json: bool,
}

pub struct InfoCommand;

#[async_trait]
impl Command for InfoCommand {
    async fn run(&self, ctx: &mut RunContext, args: &[String]) -> Result<(), CommandError> {
        let Some(args) = parse_args::<InfoArgs>("info", args)? else {
            return Ok(());
        };

        if args.json {
            let output = serde_json::json!({
                "workspace": ctx.workspace.root,
                "environment": ctx.options.environment,
                "team": ctx.team_name(),
                "org": ctx.org(),
                "repos": ctx.repos(),
                "service": ctx.service.as_ref().map(|s| &s.name),
                "configDir": ctx.paths.dir,
                "configFile": ctx.paths.file,
                "cdn": ctx.base_cdn_url(),
            });
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|e| CommandError::new(e.to_string()))?;
            println!("{rendered}");
            return Ok(());
        }

        let none = || "(none)".dimmed().to_string();
        println!("{}", "bosun".bold());
        println!();
        println!("  {:<14} {}", "Workspace:".dimmed(), ctx.workspace.root.display());
        println!("  {:<14} {}", "Environment:".dimmed(), ctx.options.environment);
        println!(
            "  {:<14} {}",
            "Team:".dimmed(),
            ctx.team_name().unwrap_or_else(none)
        );
        let org = ctx.org();
        println!(
            "  {:<14} {}",
            "Org:".dimmed(),
            if org.is_empty() { none() } else { org }
        );
        if let Some(service) = &ctx.service {
            println!("  {:<14} {}", "Service:".dimmed(), service.name);
        }
        println!("  {:<14} {}", "Config:".dimmed(), ctx.paths.file.display());
        println!("  {:<14} {}", "CDN:".dimmed(), ctx.base_cdn_url());
        println!();
        println!("  {}:", "Repos".dimmed());
        for repo in ctx.repos() {
            println!("    {} {}", "+".green(), repo);
        }
        Ok(())
    }
}
