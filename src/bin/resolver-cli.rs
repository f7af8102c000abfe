use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "resolver-cli")]
#[command(about = "Management CLI for the content resolver", long_about = None)]
struct Cli {
    /// Public API base URL.
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    /// Admin API base URL.
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, env = "RESOLVER_ADMIN_KEY", default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a slug through the public API
    Resolve {
        slug: String,
        #[arg(long)]
        locale: Option<String>,
    },
    /// Check service status
    Status,
    /// Show cache size, breaker state and adapters
    Stats,
    /// Drop every cached resolution
    ClearCache,
    /// Enable an adapter
    Enable { name: String },
    /// Disable an adapter
    Disable { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Resolve { slug, locale } => {
            let mut query = vec![("slug", slug)];
            if let Some(locale) = locale {
                query.push(("locale", locale));
            }
            client
                .get(format!("{}/api/content/resolve", cli.api_url))
                .query(&query)
                .send()
                .await?
        }
        Commands::Status => {
            client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Stats => {
            client
                .get(format!("{}/admin/stats", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::ClearCache => {
            client
                .delete(format!("{}/admin/cache", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Enable { name } => set_enabled(&client, &cli.url, headers, &name, true).await?,
        Commands::Disable { name } => set_enabled(&client, &cli.url, headers, &name, false).await?,
    };

    print_response(res).await
}

async fn set_enabled(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
    name: &str,
    enabled: bool,
) -> Result<reqwest::Response, reqwest::Error> {
    client
        .put(format!("{}/admin/adapters/{}/enabled", url, name))
        .headers(headers)
        .json(&json!({ "enabled": enabled }))
        .send()
        .await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if text.is_empty() {
        println!("OK ({})", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
