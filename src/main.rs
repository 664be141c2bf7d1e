//! `regdash`: CLI for the property-regularization dashboard API.
//!
//! Drives the same gateway client the dashboard uses: login captures the
//! session cookie and prints it so follow-up invocations can pass it via
//! `--session-token` / `REG_SESSION_TOKEN`.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use regdash::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use regdash::net::types::{ChangePasswordRequest, LoginRequest};
use regdash::net::{ApiClient, ApiError, services};

#[derive(Parser, Debug)]
#[command(name = "regdash", about = "Property-regularization dashboard API CLI")]
struct Cli {
    #[arg(long, env = "REG_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "REG_SESSION_TOKEN")]
    session_token: Option<String>,

    #[arg(long, env = "REG_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate and print the captured session token.
    Login {
        email: String,
        password: String,
    },
    /// Show the current session's user.
    Me,
    Logout,
    ChangePassword {
        current_password: String,
        new_password: String,
    },
    Dashboard(DashboardCommand),
    Properties(PropertiesCommand),
}

#[derive(Args, Debug)]
struct DashboardCommand {
    #[command(subcommand)]
    command: DashboardSubcommand,
}

#[derive(Subcommand, Debug)]
enum DashboardSubcommand {
    Overview,
    ByStatus,
    ByNeighborhood,
    OverdueSteps,
}

#[derive(Args, Debug)]
struct PropertiesCommand {
    #[command(subcommand)]
    command: PropertiesSubcommand,
}

#[derive(Subcommand, Debug)]
enum PropertiesSubcommand {
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        neighborhood: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let cli = Cli::parse();
    let config = ClientConfig {
        api_url: cli.api_url,
        session_token: cli.session_token,
        request_timeout: Duration::from_secs(cli.timeout_secs),
    };
    let api = ApiClient::new(&config)?;

    match cli.command {
        Command::Login { email, password } => {
            let response = services::auth::login(&api, &LoginRequest { email, password }).await?;
            print_json(&serde_json::to_value(&response.user).map_err(decode_error)?)?;
            match api.session_token() {
                Some(token) => eprintln!("session token: {token}"),
                None => eprintln!("warning: server issued no session cookie"),
            }
            Ok(())
        }
        Command::Me => {
            let session = services::auth::current_user(&api).await?;
            print_json(&serde_json::to_value(&session.user).map_err(decode_error)?)
        }
        Command::Logout => {
            services::auth::logout(&api).await?;
            println!("ok");
            Ok(())
        }
        Command::ChangePassword {
            current_password,
            new_password,
        } => {
            let request = ChangePasswordRequest {
                current_password,
                new_password,
            };
            services::auth::change_password(&api, &request).await?;
            println!("ok");
            Ok(())
        }
        Command::Dashboard(dashboard) => run_dashboard(&api, dashboard).await,
        Command::Properties(properties) => run_properties(&api, properties).await,
    }
}

async fn run_dashboard(api: &ApiClient, dashboard: DashboardCommand) -> Result<(), ApiError> {
    let body = match dashboard.command {
        DashboardSubcommand::Overview => {
            let overview = services::dashboard::overview(api).await?;
            serde_json::to_value(&overview).map_err(decode_error)?
        }
        DashboardSubcommand::ByStatus => services::dashboard::properties_by_status(api).await?,
        DashboardSubcommand::ByNeighborhood => {
            services::dashboard::properties_by_neighborhood(api).await?
        }
        DashboardSubcommand::OverdueSteps => services::dashboard::overdue_steps(api).await?,
    };
    print_json(&body)
}

async fn run_properties(api: &ApiClient, properties: PropertiesCommand) -> Result<(), ApiError> {
    match properties.command {
        PropertiesSubcommand::List {
            status,
            neighborhood,
            page,
        } => {
            let page_string;
            let mut params: Vec<(&str, &str)> = Vec::new();
            if let Some(status) = &status {
                params.push(("status", status.as_str()));
            }
            if let Some(neighborhood) = &neighborhood {
                params.push(("neighborhood", neighborhood.as_str()));
            }
            if let Some(page) = page {
                page_string = page.to_string();
                params.push(("page", page_string.as_str()));
            }
            let body = services::properties::list(api, &params).await?;
            print_json(&body)
        }
    }
}

fn decode_error(error: serde_json::Error) -> ApiError {
    ApiError::Decode(error.to_string())
}

fn print_json(value: &Value) -> Result<(), ApiError> {
    let rendered = serde_json::to_string_pretty(value).map_err(decode_error)?;
    println!("{rendered}");
    Ok(())
}
