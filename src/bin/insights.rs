//! insights CLI: summarize a one-on-one meeting log from the terminal.

use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use oneonone_insights::config::Config;
use oneonone_insights::dataset::Dataset;
use oneonone_insights::engine::{Engine, Snapshot, select};
use oneonone_insights::filter::FilterSelection;
use oneonone_insights::insights::generate;
use oneonone_insights::kpi::{aggregate_at, category_distribution, sentiment_breakdown};
use oneonone_insights::lookup::{RecordDetail, lookup, topics};
use oneonone_insights::model::{KpiSummary, Record, Sentiment};
use oneonone_insights::normalize::parse_timestamp;
use oneonone_insights::telemetry::{TelemetryConfig, init_telemetry};
use oneonone_insights::trackers::{action_items, risk_items, upcoming_deadlines};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insights", about = "KPIs and insights for one-on-one meeting logs")]
struct Cli {
    /// Spreadsheet or JSON file (overrides INSIGHTS_SOURCE)
    #[arg(long, global = true)]
    source: Option<PathBuf>,
    /// Worksheet name (overrides INSIGHTS_SHEET)
    #[arg(long, global = true)]
    sheet: Option<String>,
    /// Evaluation instant, e.g. 2025-03-04 or 2025-03-04T09:00:00 (default: now)
    #[arg(long, global = true)]
    now: Option<String>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(flatten)]
    filters: FilterArgs,
    #[command(subcommand)]
    command: Command,
}

/// Filter flags. An omitted dimension allows everything.
#[derive(Args)]
struct FilterArgs {
    /// Only these persons (repeatable)
    #[arg(long = "person", global = true)]
    persons: Vec<String>,
    /// Only these categories (repeatable)
    #[arg(long = "category", global = true)]
    categories: Vec<String>,
    /// Only these sentiments: +, ±, - or positive, mixed, negative (repeatable)
    #[arg(long = "sentiment", global = true)]
    sentiments: Vec<Sentiment>,
}

impl FilterArgs {
    fn selection(&self, dataset: &Dataset) -> FilterSelection {
        let mut selection = FilterSelection::all(dataset);
        if !self.persons.is_empty() {
            selection = selection.persons(self.persons.iter().cloned());
        }
        if !self.categories.is_empty() {
            selection = selection.categories(self.categories.iter().cloned());
        }
        if !self.sentiments.is_empty() {
            selection = selection.sentiments(self.sentiments.iter().copied());
        }
        selection
    }
}

#[derive(Subcommand)]
enum Command {
    /// KPIs, insights, and trackers together
    Summary,
    /// KPI counts
    Kpis,
    /// Insight lines
    Insights,
    /// Deadlines in the next 7 days
    Deadlines,
    /// Mixed/negative or urgent items
    Risks,
    /// Due-soon and overdue actions
    Actions,
    /// Category and sentiment distribution
    Distribution,
    /// Distinct topics in the current view
    Topics,
    /// Available filter values
    Options,
    /// Show the full conversation for a topic
    Show {
        /// Topic key (see `topics`)
        topic: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.source.clone())?;
    if cli.sheet.is_some() {
        config.sheet = cli.sheet.clone();
    }

    let _guard = init_telemetry(TelemetryConfig::from_config(&config, "insights"))?;

    let now = match cli.now.as_deref() {
        Some(s) => parse_timestamp(s).ok_or_else(|| anyhow!("invalid --now value: {s}"))?,
        None => Local::now().naive_local(),
    };

    let mut engine = Engine::from_config(&config)?;
    let dataset = engine
        .dataset(now)
        .with_context(|| format!("loading {}", config.source.display()))?;
    let selection = cli.filters.selection(&dataset);
    let view = select(&dataset, &selection);
    let rules = engine.rules();

    match cli.command {
        Command::Summary => {
            let snapshot = Snapshot::build(&view, now, rules);
            if cli.json {
                return print_json(&snapshot);
            }
            print_kpis(&snapshot.kpis);
            println!();
            print_insights(&snapshot.insights);
            println!("\nUpcoming deadlines (next 7 days)");
            print_records(
                &snapshot.upcoming_deadlines,
                now,
                "No deadlines in the next 7 days.",
            );
            println!("\nRisk items");
            print_records(
                &snapshot.risk_items,
                now,
                "No risk-flagged items under current filters.",
            );
            println!("\nAction tracker");
            print_records(
                &snapshot.action_items,
                now,
                "No upcoming or overdue actions, all items on track!",
            );
        }
        Command::Kpis => {
            let kpis = aggregate_at(&view, now);
            if cli.json {
                return print_json(&kpis);
            }
            print_kpis(&kpis);
        }
        Command::Insights => {
            let lines = generate(&view, now, rules);
            if cli.json {
                return print_json(&lines);
            }
            print_insights(&lines);
        }
        Command::Deadlines => render_records(
            cli.json,
            &upcoming_deadlines(&view, now),
            now,
            "No deadlines in the next 7 days.",
        )?,
        Command::Risks => render_records(
            cli.json,
            &risk_items(&view, now),
            now,
            "No risk-flagged items under current filters.",
        )?,
        Command::Actions => render_records(
            cli.json,
            &action_items(&view, now),
            now,
            "No upcoming or overdue actions, all items on track!",
        )?,
        Command::Distribution => {
            let categories = category_distribution(&view);
            let sentiments = sentiment_breakdown(&view);
            if cli.json {
                return print_json(&serde_json::json!({
                    "categories": categories,
                    "sentiments": sentiments,
                }));
            }
            println!("Topic distribution by category");
            for c in &categories {
                println!("  {:<40}  {}", c.label, c.count);
            }
            println!("\nSentiment breakdown");
            for s in &sentiments {
                println!("  {:<4}  {}", s.label, s.count);
            }
        }
        Command::Topics => {
            let topics = topics(&view);
            if cli.json {
                return print_json(&topics);
            }
            for topic in topics {
                println!("{topic}");
            }
        }
        Command::Options => {
            #[derive(Serialize)]
            struct Options<'a> {
                persons: Vec<&'a str>,
                categories: Vec<&'a str>,
                sentiments: Vec<Sentiment>,
            }
            let options = Options {
                persons: dataset.persons(),
                categories: dataset.categories(),
                sentiments: dataset.sentiments(),
            };
            if cli.json {
                return print_json(&options);
            }
            println!("Persons:    {}", options.persons.join(", "));
            println!("Categories: {}", options.categories.join(", "));
            let sentiments: Vec<String> =
                options.sentiments.iter().map(|s| s.to_string()).collect();
            println!("Sentiments: {}", sentiments.join(", "));
        }
        Command::Show { topic } => {
            let record = lookup(&view, &topic)?;
            let detail = RecordDetail::new(record);
            if cli.json {
                return print_json(&serde_json::json!({
                    "record": record,
                    "detail": detail,
                }));
            }
            println!("{}", detail.header);
            println!("{}", "-".repeat(80));
            println!("{}", detail.raw_text);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_kpis(kpis: &KpiSummary) {
    println!(
        "{:<12}  {:<8}  {:<6}  {:<8}  {:<8}  OVERDUE",
        "TOTAL TOPICS", "POSITIVE", "MIXED", "NEGATIVE", "DUE SOON"
    );
    println!(
        "{:<12}  {:<8}  {:<6}  {:<8}  {:<8}  {}",
        kpis.total, kpis.positive, kpis.mixed, kpis.negative, kpis.due_soon, kpis.overdue
    );
}

fn print_insights(lines: &[String]) {
    println!("Auto insights");
    for line in lines {
        println!("- {line}");
    }
}

fn render_records(
    json: bool,
    records: &[&Record],
    now: NaiveDateTime,
    empty: &str,
) -> anyhow::Result<()> {
    if json {
        return print_json(records);
    }
    print_records(records, now, empty);
    Ok(())
}

fn print_records(records: &[&Record], now: NaiveDateTime, empty: &str) {
    if records.is_empty() {
        println!("{empty}");
        return;
    }

    println!(
        "{:<16}  {:<32}  {:<10}  {:<8}  ACTION",
        "PERSON", "TOPIC", "DUE", "STATUS"
    );
    println!("{}", "-".repeat(100));
    for record in records {
        println!(
            "{:<16}  {:<32}  {:<10}  {:<8}  {}",
            clip(&record.person, 16),
            clip(&record.topic, 32),
            format_due(record.due_date),
            record.status_at(now),
            record.action
        );
    }
    println!("\n{} item(s)", records.len());
}

fn format_due(due: Option<NaiveDateTime>) -> String {
    due.map(|d| d.date().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate to `width` characters.
fn clip(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        s.chars().take(width).collect()
    } else {
        s.to_string()
    }
}
