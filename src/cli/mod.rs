//! CLI command handling
//!
//! Dispatches CLI commands and formats their output.

use std::path::PathBuf;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::{active_environment_name, Config};
use crate::common::paths;
use crate::common::{Error, Result};
use crate::report;
use crate::session::ApiContext;
use crate::stepdocs;
use crate::steps::{send_request, HttpMethod, RequestOptions};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    let config = Config::load()?;

    match command {
        Commands::Envs => {
            let active = active_environment_name();
            if config.environments.is_empty() {
                println!("No environments configured");
                return Ok(());
            }

            println!("Environments:");
            for (name, env) in &config.environments {
                let marker = if *name == active { "*".green().bold() } else { " ".normal() };
                println!(
                    "  {} {:<12} {} ({} ms)",
                    marker, name, env.base_url, env.timeout_ms
                );
            }
            if config.environment(&active).is_none() {
                println!(
                    "\n{} active environment '{}' is not configured; base URL will be empty",
                    "warning:".yellow().bold(),
                    active
                );
            }
            Ok(())
        }

        Commands::Request {
            method,
            endpoint,
            body,
            env,
            headers,
            query,
            token,
        } => {
            let method: HttpMethod = method.parse()?;
            let env_name = env.unwrap_or_else(active_environment_name);
            let mut ctx = ApiContext::for_environment(config.environment(&env_name));

            for header in &headers {
                let (name, value) = parse_header(header)?;
                ctx.set_header(name, value);
            }
            if let Some(token) = token {
                ctx.set_auth_token(&token);
            }

            let params = query
                .iter()
                .map(String::as_str)
                .map(parse_query)
                .collect::<Result<Vec<_>>>()?;

            let mut options = RequestOptions::new(method, &endpoint);
            if let Some(body) = body.as_deref() {
                options = options.with_body(body);
            }
            if !params.is_empty() {
                options = options.with_params(&params);
            }

            let response = send_request(&mut ctx, options).await?;
            ctx.close();

            let status = response.status().to_string();
            let status = if response.ok() {
                status.green().bold()
            } else {
                status.red().bold()
            };
            println!("{} {} {}", method, response.url(), status);

            match response.json() {
                Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
                Err(_) if response.text().is_empty() => {}
                Err(_) => println!("{}", response.text()),
            }
            Ok(())
        }

        Commands::Report { input } => {
            let path = input.unwrap_or_else(|| paths::report_path(&config.paths.reports_dir));
            let features = report::load(&path)?;
            let summary = report::summarize(&features);
            print_report(&path, &summary, &report::Metadata::current());

            if summary.success() {
                Ok(())
            } else {
                Err(Error::Report(format!(
                    "{} scenario(s) failed",
                    summary.scenarios_failed
                )))
            }
        }

        Commands::Steps { source, output } => {
            let output: PathBuf =
                output.unwrap_or_else(|| paths::steps_doc_path(&config.paths.docs_dir));
            let count = stepdocs::generate(&source, &output)?;
            println!(
                "{} Wrote {} step definitions to {}",
                "✓".green(),
                count,
                output.display()
            );
            Ok(())
        }
    }
}

fn parse_header(header: &str) -> Result<(&str, &str)> {
    header
        .split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| Error::InvalidHeader {
            name: header.to_string(),
            reason: "expected 'Name: value'".to_string(),
        })
}

fn parse_query(pair: &str) -> Result<(String, String)> {
    pair.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| Error::Config(format!("query parameter '{}' is not key=value", pair)))
}

fn print_report(path: &std::path::Path, summary: &report::Summary, meta: &report::Metadata) {
    println!("Report: {}", path.display());
    println!(
        "  {} v{}, environment {}, platform {}",
        "apibdd".bold(),
        meta.app_version,
        meta.environment,
        meta.platform
    );
    println!();
    println!("  Features:  {}", summary.features);
    println!(
        "  Scenarios: {} ({} passed, {} failed, {} skipped)",
        summary.scenarios_total(),
        summary.scenarios_passed.to_string().green(),
        summary.scenarios_failed.to_string().red(),
        summary.scenarios_skipped.to_string().yellow()
    );
    println!(
        "  Steps:     {} ({} passed, {} failed, {} skipped)",
        summary.steps_total(),
        summary.steps_passed.to_string().green(),
        summary.steps_failed.to_string().red(),
        summary.steps_skipped.to_string().yellow()
    );

    if !summary.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &summary.failures {
            println!(
                "  {} {} > {}",
                "✗".red(),
                failure.feature,
                failure.scenario.bold()
            );
            println!("      {}", failure.step.dimmed());
            for line in failure.message.lines() {
                println!("      {}", line);
            }
        }
    }
}
