use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::env;

use funders_dashboard::{
    build_http_client, load_dashboard, render_dashboard, DashboardParams, GraphqlClient, Settings,
};

const USAGE: &str = "Usage: funders-dashboard <slug> [--period FROM→TO] [--scale month|year] [--offset N] [--limit N] [--json]";

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Cli {
    slug: String,
    params: DashboardParams,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut cli = Cli::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} needs a value\n{}", flag, USAGE))
        };

        match arg.as_str() {
            "--period" => cli.params.period = Some(value("--period")?),
            "--scale" => cli.params.scale = Some(value("--scale")?),
            "--offset" => cli.params.offset = Some(value("--offset")?),
            "--limit" => cli.params.limit = Some(value("--limit")?),
            "--json" => cli.json = true,
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with("--") => bail!("Unknown option {}\n{}", other, USAGE),
            other if cli.slug.is_empty() => cli.slug = other.to_string(),
            other => bail!("Unexpected argument {}\n{}", other, USAGE),
        }
    }

    if cli.slug.is_empty() {
        bail!(USAGE);
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let settings = Settings::load();
    let client = GraphqlClient::new(build_http_client(&settings)?, settings.graphql_url.clone())
        .with_authorization(env::var("GRAPHQL_AUTHORIZATION").ok());

    let dashboard = load_dashboard(&client, &cli.slug, cli.params, Utc::now())
        .await
        .with_context(|| format!("Could not build the dashboard for {}", cli.slug))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", render_dashboard(&dashboard, &settings));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["alice", "--scale", "month", "--limit", "10", "--json"])).unwrap();

        assert_eq!(cli.slug, "alice");
        assert_eq!(cli.params.scale.as_deref(), Some("month"));
        assert_eq!(cli.params.limit(), 10);
        assert!(cli.json);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["alice", "--period"])).is_err());
        assert!(parse_args(&args(&["alice", "--verbose"])).is_err());
        assert!(parse_args(&args(&["alice", "bob"])).is_err());
    }
}
