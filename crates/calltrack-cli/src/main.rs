//! Calltrack CLI - Sales call tracking from the terminal
//!
//! Thin client over the Calltrack HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::{Confirm, Input, Password};

use api::{CallFields, CallResponse, CalltrackClient};
use config::Config;

#[derive(Parser)]
#[command(name = "calltrack")]
#[command(about = "Calltrack CLI - Sales call tracking", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Check that the server is reachable
    Health,

    /// List calls
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show a single call
    Show {
        /// Call ID
        id: String,
    },

    /// Log a new call
    Add {
        /// Prospect name (will prompt if not provided)
        prospect: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update fields of an existing call
    Update {
        /// Call ID
        id: String,
        /// New prospect name
        #[arg(long)]
        prospect: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a call
    Delete {
        /// Call ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Dashboard figures for the (filtered) call list
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set the API base URL
    SetUrl {
        /// e.g. http://127.0.0.1:3000
        url: String,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Match prospect name, company or notes
    #[arg(short, long)]
    search: Option<String>,
    /// Outcome to keep (qualified, not-qualified, follow-up, closed-won, closed-lost, all)
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args)]
struct FieldArgs {
    /// Company name
    #[arg(short, long)]
    company: Option<String>,
    /// Outcome (qualified, not-qualified, follow-up, closed-won, closed-lost)
    #[arg(short, long)]
    outcome: Option<String>,
    /// Call notes
    #[arg(short, long)]
    notes: Option<String>,
    /// Call date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,
    /// Duration in seconds
    #[arg(short, long)]
    duration: Option<i64>,
    /// Call status (completed, scheduled, cancelled)
    #[arg(long)]
    status: Option<String>,
    /// Share of the call the rep spent talking (0-1)
    #[arg(long)]
    talk_time_ratio: Option<f64>,
    /// Number of discovery questions asked
    #[arg(long)]
    questions: Option<i64>,
    /// Sentiment score (0-1)
    #[arg(long)]
    sentiment: Option<f64>,
    /// Comma-separated tags
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,
}

impl FieldArgs {
    fn into_fields(self, prospect_name: Option<String>) -> CallFields {
        CallFields {
            prospect_name,
            company: self.company,
            outcome: self.outcome,
            notes: self.notes,
            date: self.date,
            duration: self.duration,
            status: self.status,
            talk_time_ratio: self.talk_time_ratio,
            questions_asked: self.questions,
            sentiment_score: self.sentiment,
            tags: (!self.tags.is_empty()).then_some(self.tags),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Config { action } => cmd_config(action),
        Commands::Health => cmd_health().await,
        Commands::List { filter } => cmd_list(filter).await,
        Commands::Show { id } => cmd_show(id).await,
        Commands::Add { prospect, fields } => cmd_add(prospect, fields).await,
        Commands::Update { id, prospect, fields } => cmd_update(id, prospect, fields).await,
        Commands::Delete { id, yes } => cmd_delete(id, yes).await,
        Commands::Stats { filter } => cmd_stats(filter).await,
    }
}

fn client() -> Result<CalltrackClient> {
    let config = Config::load()?;
    Ok(CalltrackClient::new(&config.base_url, config.api_key.as_deref()))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    print!("Testing connection... ");
    let client = CalltrackClient::new(&config.base_url, Some(&api_key));
    match client.verify_key().await {
        Ok(()) => println!("{}", "OK".green()),
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("API key rejected: {}", e);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

fn cmd_config(action: Option<ConfigAction>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(ConfigAction::SetUrl { url }) = action {
        config.set_base_url(url);
        config.save()?;
        println!("{} Base URL set to {}", "✓".green(), config.base_url.cyan());
        return Ok(());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    let api_key_state = if config.api_key.is_some() {
        "Set".green()
    } else {
        "Not set".red()
    };
    println!("  API Key: {}", api_key_state);

    Ok(())
}

async fn cmd_health() -> Result<()> {
    let config = Config::load()?;
    let client = CalltrackClient::new(&config.base_url, None);

    print!("{} ... ", config.base_url);
    if client.health().await.unwrap_or(false) {
        println!("{}", "OK".green());
        Ok(())
    } else {
        println!("{}", "Unreachable".red());
        bail!("Server at {} is not healthy", config.base_url)
    }
}

async fn cmd_list(filter: FilterArgs) -> Result<()> {
    let calls = client()?
        .list_calls(filter.search.as_deref(), filter.status.as_deref())
        .await?;

    if calls.is_empty() {
        println!("{}", "No calls found.".dimmed());
        return Ok(());
    }

    println!("{} ({})", "Calls".bold(), calls.len());
    for call in &calls {
        println!(
            "  {} {} {} {} {}",
            call.date.dimmed(),
            outcome_label(&call.outcome),
            call.prospect_name.bold(),
            company_suffix(&call.company),
            format!("[{}]", call.id).dimmed()
        );
        if !call.notes.is_empty() {
            println!("      {}", truncate_string(&call.notes, 70).dimmed());
        }
    }

    Ok(())
}

async fn cmd_show(id: String) -> Result<()> {
    let call = client()?.get_call(&id).await?;
    print_call(&call);
    Ok(())
}

async fn cmd_add(prospect: Option<String>, fields: FieldArgs) -> Result<()> {
    let prospect = match prospect {
        Some(p) => p,
        None => Input::new()
            .with_prompt("Prospect name")
            .interact_text()
            .context("Failed to read prospect name")?,
    };

    let mut body = fields.into_fields(Some(prospect));
    if body.outcome.is_none() {
        let outcome: String = Input::new()
            .with_prompt("Outcome")
            .default("follow-up".to_string())
            .interact_text()
            .context("Failed to read outcome")?;
        body.outcome = Some(outcome);
    }

    let call = client()?.create_call(&body).await?;

    println!("{} Call logged: {}", "✓".green(), call.id.cyan());
    print_call(&call);
    Ok(())
}

async fn cmd_update(id: String, prospect: Option<String>, fields: FieldArgs) -> Result<()> {
    let body = fields.into_fields(prospect);
    if body.is_empty() {
        bail!("Nothing to update. Pass at least one field, e.g. --notes");
    }

    let call = client()?.update_call(&id, &body).await?;

    println!("{} Call updated: {}", "✓".green(), call.id.cyan());
    print_call(&call);
    Ok(())
}

async fn cmd_delete(id: String, yes: bool) -> Result<()> {
    let client = client()?;

    if !yes {
        let call = client.get_call(&id).await?;
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete call with {} ({})?", call.prospect_name, call.date))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", "Aborted.".dimmed());
            return Ok(());
        }
    }

    let removed = client.delete_call(&id).await?;
    println!(
        "{} Deleted call with {} ({})",
        "✓".green(),
        removed.prospect_name.bold(),
        removed.id.dimmed()
    );
    Ok(())
}

async fn cmd_stats(filter: FilterArgs) -> Result<()> {
    let stats = client()?
        .dashboard(filter.search.as_deref(), filter.status.as_deref())
        .await?;

    println!("{}", "Dashboard:".bold());
    println!("  Total calls:    {}", stats.total_calls.to_string().cyan());
    println!("  Avg duration:   {:.1} min", stats.avg_duration_minutes);
    println!("  Qualified rate: {:.0}%", stats.qualified_rate);
    println!("  Avg sentiment:  {:.2}", stats.avg_sentiment);
    println!();
    println!("{}", "Outcomes:".bold());
    for entry in &stats.outcomes {
        println!("  {:<14} {}", outcome_label(&entry.outcome), entry.count);
    }

    Ok(())
}

// ============================================
// Output helpers
// ============================================

fn print_call(call: &CallResponse) {
    println!();
    println!("  {} {}", call.prospect_name.bold(), outcome_label(&call.outcome));
    println!("  ID:       {}", call.id.dimmed());
    if !call.company.is_empty() {
        println!("  Company:  {}", call.company);
    }
    println!("  Date:     {}", call.date);
    println!("  Duration: {}", format_duration(call.duration));
    if let Some(status) = &call.status {
        println!("  Status:   {}", status);
    }
    if let Some(ratio) = call.talk_time_ratio {
        println!("  Talk time: {:.0}%", ratio * 100.0);
    }
    if let Some(questions) = call.questions_asked {
        println!("  Questions: {}", questions);
    }
    if let Some(score) = call.sentiment_score {
        println!("  Sentiment: {:.2}", score);
    }
    if !call.tags.is_empty() {
        println!("  Tags:     {}", call.tags.join(", ").cyan());
    }
    if !call.notes.is_empty() {
        println!();
        println!("  {}", call.notes);
    }
}

fn outcome_label(outcome: &str) -> ColoredString {
    match outcome {
        "qualified" | "closed-won" => outcome.green(),
        "follow-up" => outcome.yellow(),
        "not-qualified" | "closed-lost" => outcome.red(),
        _ => outcome.normal(),
    }
}

/// `@ Company`, or nothing when the company is blank
fn company_suffix(company: &str) -> String {
    if company.is_empty() {
        String::new()
    } else {
        format!("@ {}", company)
    }
}

/// Seconds as `Xm Ys`
fn format_duration(seconds: u64) -> String {
    let (minutes, secs) = (seconds / 60, seconds % 60);
    if minutes == 0 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}
