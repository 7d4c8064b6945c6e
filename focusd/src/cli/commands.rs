//! CLI command execution.
//!
//! `serve` runs the web server in-process; every other command is a thin
//! client talking to a running server over HTTP.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::{self, DEFAULT_PORT};
use crate::server;

use super::args::{Cli, Commands};

// === HTTP Client for Server Communication ===

#[derive(Debug, Deserialize)]
struct StartResponse {
    session_id: u64,
    start_time: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DailyStat {
    date: String,
    sessions: usize,
    minutes: f64,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    total_sessions: usize,
    completed_sessions: usize,
    total_minutes: f64,
    daily_stats: Vec<DailyStat>,
}

/// Base URL of the server: explicit flag, then the recorded port, then the default.
fn server_url(explicit: Option<&str>) -> String {
    explicit.map_or_else(
        || {
            let port = config::recorded_port().unwrap_or(DEFAULT_PORT);
            format!("http://127.0.0.1:{port}")
        },
        |url| url.trim_end_matches('/').to_string(),
    )
}

/// Turn a non-success response into an error carrying the server's message.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match resp.json::<ErrorResponse>().await {
        Ok(body) => bail!("{} (server returned {status})", body.error),
        Err(_) => bail!("Server returned {status}"),
    }
}

async fn start_on_server(
    base: &str,
    duration: f64,
    session_type: &str,
    environment: &str,
) -> Result<StartResponse> {
    let body = serde_json::json!({
        "duration": duration,
        "type": session_type,
        "environment": environment,
    });

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/session/start"))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach focusd at {base}. Is `focusd serve` running?"))?;

    check(resp)
        .await?
        .json()
        .await
        .context("Failed to parse response")
}

async fn end_on_server(base: &str, actual_duration: Option<f64>, completed: bool) -> Result<()> {
    let body = serde_json::json!({
        "actual_duration": actual_duration,
        "completed": completed,
    });

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/session/end"))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach focusd at {base}. Is `focusd serve` running?"))?;

    check(resp).await?;
    Ok(())
}

async fn stats_from_server(base: &str) -> Result<StatsResponse> {
    let resp = reqwest::Client::new()
        .get(format!("{base}/api/stats"))
        .send()
        .await
        .with_context(|| format!("Failed to reach focusd at {base}. Is `focusd serve` running?"))?;

    check(resp)
        .await?
        .json()
        .await
        .context("Failed to parse stats")
}

fn print_stats(stats: &StatsResponse) {
    println!(
        "Sessions: {} ({} completed), {} minutes focused",
        stats.total_sessions, stats.completed_sessions, stats.total_minutes
    );
    println!();
    println!("{:<12} {:>8} {:>8}", "Date", "Sessions", "Minutes");
    for day in &stats.daily_stats {
        println!("{:<12} {:>8} {:>8}", day.date, day.sessions, day.minutes);
    }
}

// === Command Execution ===

pub async fn execute(cli: Cli) -> Result<()> {
    let base = server_url(cli.server.as_deref());

    match cli.command {
        Commands::Serve(args) => server::start_server(args.into()).await,
        Commands::Start {
            duration,
            session_type,
            environment,
        } => {
            let started = start_on_server(&base, duration, &session_type, &environment).await?;
            println!(
                "Started session {} at {}",
                started.session_id, started.start_time
            );
            Ok(())
        }
        Commands::End {
            actual_duration,
            abandoned,
        } => {
            end_on_server(&base, actual_duration, !abandoned).await?;
            println!("Session ended");
            Ok(())
        }
        Commands::Stats => {
            let stats = stats_from_server(&base).await?;
            print_stats(&stats);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_server_url_trims_slash() {
        assert_eq!(
            server_url(Some("http://localhost:8080/")),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_stats_response_parses_server_payload() {
        let json = r#"{
            "total_sessions": 2,
            "completed_sessions": 1,
            "total_minutes": 25.0,
            "daily_stats": [{"date": "2024-03-10", "sessions": 1, "minutes": 25.0}]
        }"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.daily_stats[0].date, "2024-03-10");
    }
}
