//! Debtscope CLI
//!
//! Command-line client for a running Debtscope dashboard:
//! - Check server and data source status
//! - Show the dataset summary
//! - List records or chart points for a year range
//! - Print a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use debtscope::chart::ChartKind;
use debtscope::config::generate_default_config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "debtscope-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a running Debtscope dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard server URL
    #[arg(long, default_value = "http://localhost:8501", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server and data source status
    Status,

    /// Show dataset size, year bounds and sample rows
    Summary,

    /// List records in a year range
    Records {
        /// First year (default: earliest observed)
        #[arg(long)]
        from: Option<i32>,
        /// Last year (default: latest observed)
        #[arg(long)]
        to: Option<i32>,
    },

    /// Show the points of one chart for a year range
    Chart {
        /// Chart kind (line, scatter)
        kind: ChartKind,
        /// First year (default: earliest observed)
        #[arg(long)]
        from: Option<i32>,
        /// Last year (default: latest observed)
        #[arg(long)]
        to: Option<i32>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Debtscope v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("Server status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!(
                        "Data source:   {} ({})",
                        health["source_location"].as_str().unwrap_or("-"),
                        health["source"].as_str().unwrap_or("unknown")
                    );
                    if let Some(err) = health["source_error"].as_str() {
                        println!("Source error:  {}", err);
                    }
                    if let Some(fetched) = health["dataset_fetched_at"].as_str() {
                        println!("Cached since:  {}", fetched);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime:        {}", format_duration(uptime));
                    }
                }
                Ok(resp) => bail!("Server returned error: {}", resp.status()),
                Err(e) => {
                    eprintln!("Cannot connect to Debtscope at {}", cli.api_url);
                    eprintln!();
                    eprintln!("Make sure the dashboard server is running:");
                    eprintln!("  cargo run --bin debtscope");
                    return Err(e.into());
                }
            }
        }

        Commands::Summary => {
            let data = get_json(&client, &format!("{}/api/v1/dataset", cli.api_url), &[]).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
                return Ok(());
            }

            if cli.format != "csv" {
                println!("Source: {}", data["source"].as_str().unwrap_or("-"));
                println!("Rows:   {}", data["rows"].as_u64().unwrap_or(0));
                match (data["bounds"]["min"].as_i64(), data["bounds"]["max"].as_i64()) {
                    (Some(min), Some(max)) => println!("Years:  {} - {}", min, max),
                    _ => println!("Years:  -"),
                }
                println!();
            }

            let columns = string_array(&data["sample"]["columns"]);
            let rows: Vec<Vec<String>> = data["sample"]["rows"]
                .as_array()
                .map(|rows| rows.iter().map(string_array).collect())
                .unwrap_or_default();
            print_rows(&cli.format, &columns, &rows)?;
        }

        Commands::Records { from, to } => {
            let data = get_json(
                &client,
                &format!("{}/api/v1/records", cli.api_url),
                &range_query(from, to),
            )
            .await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
                return Ok(());
            }

            let rows: Vec<Vec<String>> = data["records"]
                .as_array()
                .map(|records| {
                    records
                        .iter()
                        .map(|r| vec![r["refPeriod"].to_string(), format_value(&r["Value"])])
                        .collect()
                })
                .unwrap_or_default();

            print_rows(&cli.format, &["refPeriod".to_string(), "Value".to_string()], &rows)?;
            if cli.format != "csv" {
                println!();
                println!("{} records", data["count"].as_u64().unwrap_or(0));
            }
        }

        Commands::Chart { kind, from, to } => {
            let data = get_json(
                &client,
                &format!("{}/api/v1/charts/{}", cli.api_url, kind),
                &range_query(from, to),
            )
            .await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data["spec"])?);
                return Ok(());
            }

            let points = data["spec"]["points"].as_array().cloned().unwrap_or_default();
            if cli.format != "csv" {
                println!("{}", data["spec"]["title"].as_str().unwrap_or("-"));
                println!(
                    "Range: {} - {} ({} points)",
                    data["selection"]["lower"], data["selection"]["upper"], points.len()
                );
                println!();
            }

            let rows: Vec<Vec<String>> = points
                .iter()
                .map(|p| vec![p["x"].to_string(), format_value(&p["y"])])
                .collect();
            print_rows(&cli.format, &["x".to_string(), "y".to_string()], &rows)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

async fn get_json(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, i32)],
) -> anyhow::Result<serde_json::Value> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Cannot connect to {}", url))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("Request failed ({}): {}", status, text);
    }

    Ok(response.json().await?)
}

fn range_query(from: Option<i32>, to: Option<i32>) -> Vec<(&'static str, i32)> {
    let mut query = Vec::new();
    if let Some(from) = from {
        query.push(("from", from));
    }
    if let Some(to) = to {
        query.push(("to", to));
    }
    query
}

fn string_array(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn format_value(value: &serde_json::Value) -> String {
    match value.as_f64() {
        Some(v) => format!("{:.2}", v),
        None => String::new(),
    }
}

fn print_rows(format: &str, columns: &[String], rows: &[Vec<String>]) -> anyhow::Result<()> {
    if format == "csv" {
        return write_csv(std::io::stdout(), columns, rows);
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(String::len)
                .chain(std::iter::once(columns[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>width$}", c, width = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(columns));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in rows {
        println!("{}", line(row));
    }
    Ok(())
}

/// Write a header and rows as RFC 4180 CSV, quoting cells as needed
fn write_csv<W: std::io::Write>(out: W, columns: &[String], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_duration(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, secs % 60)
    }
}
