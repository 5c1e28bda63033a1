use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "dashboard-cli")]
#[command(about = "Command-line client for the dashboard frontend", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000", env = "DASHBOARD_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check frontend health
    Health,
    /// List users through the API proxy
    Users,
    /// Create a user through the API proxy
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
    /// List the security widgets the frontend offers
    Extensions,
    /// Show supply-chain security data for a catalog entity
    Security {
        entity: String,
        /// Render a single component (e.g. TrivyScanCard)
        #[arg(long)]
        component: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Users => client.get(format!("{}/api/users", base)).send().await?,
        Commands::CreateUser { username, email } => {
            client
                .post(format!("{}/api/users", base))
                .json(&json!({ "username": username, "email": email }))
                .send()
                .await?
        }
        Commands::Extensions => {
            client
                .get(format!("{}/api/security/extensions", base))
                .send()
                .await?
        }
        Commands::Security { entity, component } => {
            let url = match component {
                Some(c) => format!("{}/api/security/{}/{}", base, entity, c),
                None => format!("{}/api/security/{}", base, entity),
            };
            client.get(url).send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: frontend returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
