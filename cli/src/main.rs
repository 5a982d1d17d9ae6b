use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use cli::commands::{self, describe_access, print_json};
use cli::http::HttpAuthApi;
use cli::jar::CookieJar;
use cli::nav::TerminalNavigator;
use cli::{CliError, CliGuard};
use reqwest::Method;
use serde_json::Value;
use session::{Credentials, REVALIDATE_INTERVAL, RegisterForm, SessionGuard};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portal-cli", about = "Course portal session and API CLI")]
struct Cli {
    #[arg(long, env = "PORTAL_API_URL", default_value = "http://127.0.0.1:8080/api")]
    base_url: String,

    #[arg(long, env = "PORTAL_COOKIE_JAR", default_value = ".portal-cookies.json")]
    cookie_jar: PathBuf,

    /// Route the session is "on"; redirects to login carry it back.
    #[arg(long, env = "PORTAL_PATH", default_value = "/")]
    path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
        /// Destination stored before login; `/` routes by role.
        #[arg(long)]
        redirect: Option<String>,
    },
    Logout,
    Whoami,
    Register(RegisterArgs),
    /// Show what the route guard decides for a path.
    Route {
        path: String,
    },
    /// Keep the session validated in the foreground until Ctrl-C.
    Watch {
        #[arg(long, default_value_t = REVALIDATE_INTERVAL.as_secs())]
        interval_secs: u64,
    },
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    birth_year: i32,
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    Get {
        path: String,
    },
    Post {
        path: String,
        #[arg(long)]
        data: String,
    },
    Put {
        path: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        path: String,
    },
    /// GET several paths concurrently.
    Fetch {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let guard: CliGuard = SessionGuard::new(
        HttpAuthApi::new(&cli.base_url)?,
        CookieJar::new(cli.cookie_jar),
        TerminalNavigator::new(&cli.path),
    );

    match cli.command {
        Command::Login { username, password, redirect } => {
            let credentials = Credentials::new(username, password);
            let destination = commands::login(&guard, &credentials, redirect.as_deref()).await?;
            if let Some(user) = guard.user() {
                print_json(&user)?;
            }
            println!("-> {destination}");
        }
        Command::Logout => {
            guard.logout();
            println!("logged out");
        }
        Command::Whoami => {
            let user = commands::whoami(&guard).await?;
            print_json(&user)?;
        }
        Command::Register(args) => {
            let form = RegisterForm {
                username: args.username,
                email: args.email,
                password: args.password,
                full_name: args.full_name,
                birth_year: args.birth_year,
            };
            let account = commands::register(&guard, &form).await?;
            print_json(&account)?;
        }
        Command::Route { path } => {
            let access = commands::route(&guard, &path).await;
            println!("{}", describe_access(&path, &access));
        }
        Command::Watch { interval_secs } => {
            let period = Duration::from_secs(interval_secs.max(1));
            let stop = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %err, "ctrl-c handler unavailable");
                    std::future::pending::<()>().await;
                }
            };
            commands::watch(&guard, period, stop).await;
        }
        Command::Api(api) => run_api(&guard, api).await?,
    }
    Ok(())
}

async fn run_api(guard: &CliGuard, api: ApiCommand) -> Result<(), CliError> {
    let (method, path, data) = match api.command {
        ApiSubcommand::Get { path } => (Method::GET, path, None),
        ApiSubcommand::Post { path, data } => (Method::POST, path, Some(data)),
        ApiSubcommand::Put { path, data } => (Method::PUT, path, Some(data)),
        ApiSubcommand::Delete { path } => (Method::DELETE, path, None),
        ApiSubcommand::Fetch { paths } => return run_fetch(guard, &paths).await,
    };
    let body = data.map(|raw| serde_json::from_str::<Value>(&raw)).transpose()?;
    let json = commands::api_request(guard, method, &path, body.as_ref()).await?;
    print_json(&json)
}

async fn run_fetch(guard: &CliGuard, paths: &[String]) -> Result<(), CliError> {
    let results = commands::api_fetch(guard, paths).await?;
    let total = results.len();
    let mut failed = 0_usize;
    for (path, result) in results {
        match result {
            Ok(json) => {
                println!("== {path}");
                print_json(&json)?;
            }
            Err(err) => {
                failed = failed.saturating_add(1);
                eprintln!("== {path}: {err}");
            }
        }
    }
    if failed > 0 {
        return Err(CliError::PartialFailure { failed, total });
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
