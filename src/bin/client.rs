use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Pull customer orders page by page
#[derive(Parser, Debug)]
#[command(name = "customer-orders")]
#[command(about = "client cli used by internal consumers to sync customer orders", version, long_about = None
)]
struct Cli {
    #[arg(long, default_value = "http://localhost:10000", help = "Base url of the orders server")]
    host: String,
    #[arg(long, value_name = "FILE", help = "Write the collected orders as a JSON array")]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// every order, unfiltered
    All,
    /// orders placed in one calendar month
    #[command(arg_required_else_help = true)]
    Month(MonthArgs),
    /// orders between two dates, inclusive
    #[command(arg_required_else_help = true)]
    Range(RangeArgs),
    /// orders placed after the day of the last sync
    #[command(arg_required_else_help = true)]
    Since(SinceArgs),
}

#[derive(Debug, Args)]
struct MonthArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
    #[arg(long)]
    year: i32,
}

#[derive(Debug, Args)]
struct RangeArgs {
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,
    #[arg(long, value_name = "DATE")]
    end_date: String,
}

#[derive(Debug, Args)]
struct SinceArgs {
    #[arg(long, value_name = "DATE")]
    last_load: String,
    #[arg(long, value_name = "DATE", help = "Defaults to today")]
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrdersPage {
    page: usize,
    total_rows: usize,
    has_more: bool,
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl Commands {
    fn filter_params(self) -> Vec<(&'static str, String)> {
        match self {
            Commands::All => vec![],
            Commands::Month(MonthArgs { month, year }) => {
                vec![("month", month.to_string()), ("year", year.to_string())]
            }
            Commands::Range(RangeArgs { start_date, end_date }) => start_date
                .map(|d| ("start_date", d))
                .into_iter()
                .chain([("end_date", end_date)])
                .collect(),
            Commands::Since(SinceArgs { last_load, end_date }) => vec![
                ("last_load", last_load),
                (
                    "end_date",
                    end_date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string()),
                ),
            ],
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();
    let url = format!("{}/{}", args.host.trim_end_matches('/'), "CustomerOrders");
    let filter = args.command.filter_params();
    let client = Client::new();

    let mut orders = Vec::new();
    let mut page = 1_usize;
    // walk by page number; unfiltered responses never carry a next_page link
    loop {
        let res = client
            .get(&url)
            .query(&[("page", page.to_string())])
            .query(&filter)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", url))?;
        match res.status() {
            StatusCode::OK => {
                let body = res.json::<OrdersPage>().await.context("failed to decode orders page")?;
                println!("page {} fetched, {} of {} orders", body.page, orders.len() + body.data.len(), body.total_rows);
                orders.extend(body.data);
                if !body.has_more {
                    break;
                }
                page += 1;
            }
            StatusCode::BAD_REQUEST => {
                let body = res.json::<ErrorBody>().await.context("failed to decode error")?;
                bail!("server rejected the query: {}", body.error);
            }
            unexpected => {
                bail!("got unexpected status code, {}", unexpected);
            }
        }
    }

    match args.out {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &orders)?;
            println!("wrote {} orders to {}", orders.len(), path.display());
        }
        None => println!("synced {} orders", orders.len()),
    }
    Ok(())
}
