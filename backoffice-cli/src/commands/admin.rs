//! Admin commands - talk to a running backoffice server over HTTP
//!
//! Commands: list, set-status, create-user, purge
//!
//! Lists are fetched whole and narrowed locally, the same way the admin
//! dashboard does it:
//!
//! ```bash
//! backoffice list messages --status unread --search john
//! backoffice list users --json | jq '.[].email'
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use backoffice_core::filters::{summarize, ListFilter, StatusFilter};
use backoffice_core::models::{Paginated, Pagination};
use backoffice_core::{Kind, Record};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

// ============================================================================
// Shared Args
// ============================================================================

#[derive(Parser, Debug, Clone)]
pub struct EndpointArgs {
    /// Backoffice API endpoint
    #[arg(long, env = "BACKOFFICE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl EndpointArgs {
    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.endpoint.trim_end_matches('/'), path)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Summary line plus a table (default)
    #[default]
    Table,
    /// JSON output (for piping to jq)
    Json,
}

// ============================================================================
// Command Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Record kind: users, salon-owners, salons or messages
    pub kind: Kind,

    /// Case-insensitive substring search over the kind's name fields
    #[arg(long, short)]
    pub search: Option<String>,

    /// Message status filter: all, read or unread
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Page number (1-indexed)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Records per page
    #[arg(long, default_value = "10")]
    pub per_page: u32,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    #[command(flatten)]
    pub endpoint: EndpointArgs,
}

#[derive(Parser, Debug)]
pub struct SetStatusArgs {
    /// Message ID
    pub id: String,

    /// New status (usually read or unread)
    pub status: String,

    #[command(flatten)]
    pub endpoint: EndpointArgs,
}

#[derive(Parser, Debug)]
pub struct CreateUserArgs {
    /// Username (default: testuser)
    #[arg(long)]
    pub username: Option<String>,

    /// Email address, must be unique (default: test@example.com)
    #[arg(long)]
    pub email: Option<String>,

    /// Password (default: password123)
    #[arg(long)]
    pub password: Option<String>,

    /// Role: customer, salon_owner or admin (default: customer)
    #[arg(long)]
    pub role: Option<String>,

    /// Salon name, for salon owners
    #[arg(long)]
    pub salon_name: Option<String>,

    #[command(flatten)]
    pub endpoint: EndpointArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeTarget {
    Users,
    Salons,
}

impl PurgeTarget {
    fn kind(self) -> Kind {
        match self {
            Self::Users => Kind::User,
            Self::Salons => Kind::SalonProfile,
        }
    }
}

#[derive(Parser, Debug)]
pub struct PurgeArgs {
    /// What to delete
    #[arg(value_enum)]
    pub target: PurgeTarget,

    /// Confirm deleting every record of the target
    #[arg(long)]
    pub yes: bool,

    #[command(flatten)]
    pub endpoint: EndpointArgs,
}

// ============================================================================
// HTTP Client Helpers
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletedResponse {
    message: String,
    deleted_count: u64,
}

#[derive(Debug, Deserialize)]
struct CreatedUserResponse {
    message: String,
    user: Record,
}

fn build_client() -> Result<Client> {
    Client::builder()
        .build()
        .context("Failed to build HTTP client")
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ErrorResponse>(&error_text) {
            Ok(ErrorResponse {
                message,
                error: Some(error),
            }) => Err(anyhow!("{}: {} ({})", status, message, error)),
            Ok(ErrorResponse { message, error: None }) => Err(anyhow!("{}: {}", status, message)),
            Err(_) => Err(anyhow!("{}: {}", status, error_text)),
        }
    }
}

// ============================================================================
// List Implementation
// ============================================================================

pub async fn run_list(args: ListArgs) -> Result<()> {
    let client = build_client()?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        args.output
    };

    let response = client
        .get(args.endpoint.url(args.kind.route()))
        .send()
        .await
        .context("Failed to connect to backoffice API")?;
    let records: Vec<Record> = handle_response(response).await?;
    tracing::debug!(kind = %args.kind, count = records.len(), "Fetched records");

    let summary = summarize(args.kind, &records);
    let filtered = ListFilter::new(args.search.clone(), args.status).apply(args.kind, records);
    let page = Pagination::new(args.page, args.per_page).apply(filtered);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page.items)?);
        }
        OutputFormat::Table => {
            println!("{}", summary);
            if page.items.is_empty() {
                println!("No {} found.", args.kind);
                return Ok(());
            }
            println!();
            print!("{}", render_table(args.kind, &page.items));
            println!();
            println!("{}", pager_line(&page));
        }
    }

    Ok(())
}

/// Footer such as `page 2/3  (25 matching)  prev: --page 1  next: --page 3`.
fn pager_line<T>(page: &Paginated<T>) -> String {
    let mut line = format!(
        "page {}/{}  ({} matching)",
        page.page,
        page.total_pages(),
        page.total
    );
    if page.has_prev() {
        line.push_str(&format!("  prev: --page {}", page.page - 1));
    }
    if page.has_next() {
        line.push_str(&format!("  next: --page {}", page.page + 1));
    }
    line
}

fn columns(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::User => &["_id", "username", "email", "role", "salonName"],
        Kind::SalonOwner => &["_id", "username", "email", "salonName"],
        Kind::SalonProfile => &["_id", "salonName", "ownerName", "phone", "address"],
        Kind::ContactMessage => &["_id", "status", "name", "email", "subject", "createdAt"],
    }
}

fn cell(record: &Record, column: &str) -> String {
    match column {
        "_id" => record.id.clone(),
        "createdAt" => record.created_at.format("%Y-%m-%d %H:%M").to_string(),
        field => match record.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        },
    }
}

/// Fixed-width table with one header row.
fn render_table(kind: Kind, records: &[Record]) -> String {
    let columns = columns(kind);
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| columns.iter().map(|c| cell(r, c)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = format_row(columns.to_vec());
    for row in &rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    out
}

// ============================================================================
// Mutations
// ============================================================================

pub async fn run_set_status(args: SetStatusArgs) -> Result<()> {
    let client = build_client()?;
    let url = args.endpoint.url(&format!("messages/{}/status", args.id));

    let response = client
        .patch(&url)
        .json(&json!({ "status": args.status }))
        .send()
        .await
        .context("Failed to connect to backoffice API")?;
    let message: Record = handle_response(response).await?;

    println!(
        "{} -> {}",
        message.id,
        message.get_str("status").unwrap_or("-")
    );
    Ok(())
}

impl CreateUserArgs {
    /// Only the given fields; the server fills in the rest.
    fn body(&self) -> Value {
        let mut body = Map::new();
        let fields = [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("role", &self.role),
            ("salonName", &self.salon_name),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        Value::Object(body)
    }
}

pub async fn run_create_user(args: CreateUserArgs) -> Result<()> {
    let client = build_client()?;

    let response = client
        .post(args.endpoint.url(Kind::User.route()))
        .json(&args.body())
        .send()
        .await
        .context("Failed to connect to backoffice API")?;
    let created: CreatedUserResponse = handle_response(response).await?;

    println!("{}", created.message);
    println!("{}", serde_json::to_string_pretty(&created.user)?);
    Ok(())
}

pub async fn run_purge(args: PurgeArgs) -> Result<()> {
    let kind = args.target.kind();
    if !args.yes {
        bail!("Refusing to delete all {} without --yes", kind);
    }

    let client = build_client()?;
    let response = client
        .delete(args.endpoint.url(kind.route()))
        .send()
        .await
        .context("Failed to connect to backoffice API")?;
    let deleted: DeletedResponse = handle_response(response).await?;

    tracing::warn!(kind = %kind, deleted = deleted.deleted_count, "Purged records");
    println!("{} ({} removed)", deleted.message, deleted.deleted_count);
    Ok(())
}
