//! LiveSignal CLI
//!
//! Command-line front-end for a running LiveSignal server:
//! - Verify claims
//! - Show trending topics and the dashboard feed
//! - Manage the watchlist
//! - Browse or clear the history

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use livesignal::api::dto::{
    ClearHistoryResponse, DashboardResponse, HistoryResponse, TrendingResponse,
    WatchlistResponse,
};
use livesignal::signal::{VerificationResult, WatchTopic};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "livesignal-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Real-time claim verification with grounded search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify a claim, headline or topic
    Verify {
        /// Text to verify
        query: String,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show trending topics
    Trending {
        /// Fetch a fresh list instead of the cached one
        #[arg(short, long)]
        refresh: bool,
    },

    /// Show verification history
    History {
        /// Clear the history
        #[arg(long)]
        clear: bool,
    },

    /// Manage the watchlist
    Watch {
        #[command(subcommand)]
        action: WatchAction,
    },

    /// Show the dashboard feed
    Dashboard,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum WatchAction {
    /// List watched topics
    List,
    /// Add a topic
    Add { topic: String },
    /// Remove a topic by id
    Remove { id: Uuid },
    /// Re-verify a watched topic now
    Refresh { id: Uuid },
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> anyhow::Result<T> {
        let response = request.send().await.with_context(|| {
            format!(
                "Cannot connect to LiveSignal at {} (is `livesignal` running?)",
                self.base_url
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(text);
            bail!("Request failed ({}): {}", status, message);
        }

        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        self.send(self.http.get(format!("{}{}", self.base_url, path)))
            .await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<T> {
        self.send(self.http.post(format!("{}{}", self.base_url, path)).json(body))
            .await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        self.send(self.http.delete(format!("{}{}", self.base_url, path)))
            .await
    }

    /// DELETE for endpoints that answer with an empty body
    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Cannot connect to LiveSignal at {}", self.base_url))?;
        if !response.status().is_success() {
            bail!("Request failed ({})", response.status());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);
    let json = cli.format == "json";

    match cli.command {
        Commands::Verify { query, category } => {
            if query.trim().is_empty() {
                bail!("Query cannot be empty");
            }
            let body = serde_json::json!({ "query": query, "category": category });
            let result: VerificationResult = client.post("/api/v1/verify", &body).await?;

            if json {
                print_json(&result)?;
            } else {
                print_card(&result);
            }
        }

        Commands::Trending { refresh } => {
            let trending: TrendingResponse = if refresh {
                client
                    .post("/api/v1/trending/refresh", &serde_json::json!({}))
                    .await?
            } else {
                client.get("/api/v1/trending").await?
            };

            if json {
                print_json(&trending)?;
            } else if trending.topics.is_empty() {
                println!("No trending topics cached yet.");
                println!();
                println!("Fetch them with:");
                println!("  livesignal-cli trending --refresh");
            } else {
                println!("Trending Signals");
                println!("{}", "-".repeat(40));
                for topic in &trending.topics {
                    println!("  - {}", topic);
                }
            }
        }

        Commands::History { clear } => {
            if clear {
                let cleared: ClearHistoryResponse = client.delete_json("/api/v1/history").await?;
                if json {
                    print_json(&cleared)?;
                } else {
                    println!("Cleared {} results", cleared.cleared);
                }
                return Ok(());
            }

            let history: HistoryResponse = client.get("/api/v1/history").await?;
            if json {
                print_json(&history)?;
            } else if history.results.is_empty() {
                println!("No verifications yet.");
            } else {
                print_result_table(&history.results);
            }
        }

        Commands::Watch { action } => match action {
            WatchAction::List => {
                let list: WatchlistResponse = client.get("/api/v1/watchlist").await?;
                if json {
                    print_json(&list)?;
                } else {
                    print_watchlist(&list.topics);
                }
            }
            WatchAction::Add { topic } => {
                let body = serde_json::json!({ "topic": topic });
                let added: WatchTopic = client.post("/api/v1/watchlist", &body).await?;
                if json {
                    print_json(&added)?;
                } else {
                    println!("Watching \"{}\" ({})", added.topic, added.id);
                }
            }
            WatchAction::Remove { id } => {
                client.delete(&format!("/api/v1/watchlist/{}", id)).await?;
                if !json {
                    println!("Removed {}", id);
                }
            }
            WatchAction::Refresh { id } => {
                let result: VerificationResult = client
                    .post(
                        &format!("/api/v1/watchlist/{}/verify", id),
                        &serde_json::json!({}),
                    )
                    .await?;
                if json {
                    print_json(&result)?;
                } else {
                    print_card(&result);
                }
            }
        },

        Commands::Dashboard => {
            let dashboard: DashboardResponse = client.get("/api/v1/dashboard").await?;

            if json {
                print_json(&dashboard)?;
                return Ok(());
            }

            println!("LiveSignal v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!(
                "Results: {}   Watching: {} ({} monitoring)",
                dashboard.total_results, dashboard.watching, dashboard.monitoring
            );

            println!();
            println!("Trending Signals");
            println!("{}", "-".repeat(40));
            if dashboard.trends.is_empty() {
                println!("  (none cached)");
            }
            for topic in &dashboard.trends {
                println!("  - {}", topic);
            }

            println!();
            println!("Live Feed");
            println!("{}", "-".repeat(40));
            if dashboard.recent.is_empty() {
                println!("  No verifications yet. Try:");
                println!("  livesignal-cli verify \"<claim>\"");
            } else {
                print_result_table(&dashboard.recent);
            }
        }

        Commands::Config { output } => {
            let config = livesignal::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ten-cell bar for a 0-100 score
fn confidence_bar(value: u8) -> String {
    let filled = (usize::from(value) + 5) / 10;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

fn print_card(result: &VerificationResult) {
    println!("{}", "=".repeat(60));
    println!("{}", result.query);
    println!(
        "{} | {}",
        result.category,
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", "-".repeat(60));
    println!(
        "Verdict: {:<12} Confidence: {} {}",
        result.verdict.as_str(),
        confidence_bar(result.confidence.value()),
        result.confidence
    );
    println!();

    let body = result.analysis_body();
    println!("{}", body.trim());

    if !result.sources.is_empty() {
        println!();
        println!("Sources:");
        for (i, source) in result.sources.iter().enumerate() {
            println!("  [{}] {} ({})", i + 1, source.title, source.host());
        }
    }
    println!("{}", "=".repeat(60));
}

fn print_result_table(results: &[VerificationResult]) {
    println!(
        "{:<20} {:<12} {:>5}  {}",
        "Time", "Verdict", "Conf", "Query"
    );
    println!("{}", "-".repeat(70));

    for result in results {
        println!(
            "{:<20} {:<12} {:>5}  {}",
            result.timestamp.format("%Y-%m-%d %H:%M"),
            result.verdict.as_str(),
            result.confidence.to_string(),
            truncate(&result.query, 40)
        );
    }
}

fn print_watchlist(topics: &[WatchTopic]) {
    if topics.is_empty() {
        println!("Watchlist is empty.");
        println!();
        println!("Add a topic with:");
        println!("  livesignal-cli watch add \"<topic>\"");
        return;
    }

    println!("{:<38} {:<11} {}", "ID", "Status", "Topic");
    println!("{}", "-".repeat(70));
    for topic in topics {
        println!(
            "{:<38} {:<11} {}",
            topic.id.to_string(),
            topic.status.to_string(),
            topic.topic
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
