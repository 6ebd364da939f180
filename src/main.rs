use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use grafprov::api::{self, GrafanaClient};
use grafprov::config::{self, Overrides, Settings};
use grafprov::error::{ProvisionError, EXIT_FATAL};
use grafprov::models::ProvisionReport;
use grafprov::report;
use grafprov::services::load_users_from_file;

#[derive(Parser)]
#[command(
    name = "grafprov",
    author,
    version,
    about = "Provision Grafana users from a JSON file",
    long_about = r#"grafprov: make sure every user listed in a JSON file exists in Grafana and belongs to one organization.

Runs once and exits; meant for container startup. Credentials and targets come from environment variables (optionally via `--env-file`):

  GRAFANA_URL             base URL (default http://localhost:3000)
  GRAFANA_ADMIN_USER      server admin login (default admin)
  GRAFANA_ADMIN_PASSWORD  server admin password (required)
  GRAFANA_ORG_NAME        organization to place users in (required)
  GRAFANA_USERS_FILE      users file (default /etc/grafana/users.json)
  GRAFANA_TIMEOUT_SECS    per-request timeout (default 30)

Exit status: 0 all users created or skipped, 1 some users failed, 2 nothing could be provisioned.
"#,
    after_help = "Use `grafprov <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response echo
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Args, Default)]
struct TargetArgs {
    /// Grafana base URL (overrides GRAFANA_URL)
    #[arg(long)]
    url: Option<String>,
    /// Organization name (overrides GRAFANA_ORG_NAME)
    #[arg(long)]
    org: Option<String>,
    /// Users file (overrides GRAFANA_USERS_FILE)
    #[arg(long)]
    users_file: Option<PathBuf>,
    /// Request timeout in seconds (overrides GRAFANA_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,
}

impl TargetArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            url: self.url,
            org: self.org,
            users_file: self.users_file,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing users and assign their organization role (default)
    Provision {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Validate configuration and ensure Grafana is reachable
    #[command(
        about = "Validate configuration and ensure Grafana is reachable.",
        long_about = "Validate the environment variables required for provisioning, then call Grafana's health endpoint."
    )]
    CheckConfig {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// List the users the file asks for, without touching Grafana
    Users {
        /// Users file (overrides GRAFANA_USERS_FILE)
        #[arg(long)]
        users_file: Option<PathBuf>,
    },
}

fn print_report(report: &ProvisionReport) {
    let org_state = if report.org_created { "created" } else { "existing" };
    println!(
        "{} {} (id {}, {})",
        yansi::Paint::new("Organization").bold(),
        yansi::Paint::new(&report.organization.name).cyan(),
        report.organization.id,
        org_state
    );

    if report.outcomes.is_empty() {
        println!("(no users in file)");
        return;
    }

    println!("\n{}", report::outcome_table(report));
    let summary = report::summary(report);
    if report.has_failures() {
        println!("{}\n", yansi::Paint::new(summary).red());
    } else {
        println!("{}\n", yansi::Paint::new(summary).green());
    }
}

fn report_abort(e: &ProvisionError) {
    tracing::error!(%e, "Provisioning aborted");
    eprintln!("{}: {}", yansi::Paint::new("Provisioning aborted").red(), e);
}

fn fatal(e: &ProvisionError) -> ! {
    report_abort(e);
    process::exit(e.exit_code());
}

fn build_client(settings: &Settings) -> GrafanaClient {
    match GrafanaClient::new(&settings.grafana_url, settings.credentials.clone(), settings.timeout) {
        Ok(c) => c,
        Err(e) => fatal(&ProvisionError::Client(e)),
    }
}

async fn provision(target: TargetArgs) {
    let settings = match Settings::from_env(&target.overrides()) {
        Ok(s) => s,
        Err(e) => fatal(&ProvisionError::from(e)),
    };
    let client = build_client(&settings);

    let result = grafprov::run(&settings, &client).await;
    match &result {
        Ok(report) => print_report(report),
        Err(e) => report_abort(e),
    }
    process::exit(grafprov::run_exit_code(&result));
}

async fn check_config(target: TargetArgs) {
    let settings = match Settings::from_env(&target.overrides()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", yansi::Paint::new(e.to_string()).red());
            process::exit(EXIT_FATAL);
        }
    };
    println!(
        "{} {} as {} (org '{}', users file {})",
        yansi::Paint::new("Target").bold(),
        yansi::Paint::new(&settings.grafana_url).cyan(),
        settings.credentials.user,
        settings.org_name,
        settings.users_file.display()
    );

    let client = build_client(&settings);
    let result = api::health(&client).await;
    match &result {
        Ok(info) if info.is_ok() => println!(
            "{} (Grafana {})",
            yansi::Paint::new("Configuration looks valid").green(),
            info.version
        ),
        Ok(info) => eprintln!(
            "{}: database is '{}'",
            yansi::Paint::new("Grafana is reachable but unhealthy").red(),
            info.database
        ),
        Err(e) => eprintln!("{}: {}", yansi::Paint::new("Grafana is not reachable").red(), e),
    }
    process::exit(grafprov::health_exit_code(&result));
}

fn list_users(users_file: Option<PathBuf>) {
    let path = config::resolve_users_file(|k| std::env::var(k).ok(), users_file.as_deref());
    match load_users_from_file(&path) {
        Ok(users) => println!("{}", report::render_users(&users)),
        Err(e) => fatal(&ProvisionError::from(e)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());

    match cli.command.unwrap_or(Commands::Provision {
        target: TargetArgs::default(),
    }) {
        Commands::Provision { target } => provision(target).await,
        Commands::CheckConfig { target } => check_config(target).await,
        Commands::Users { users_file } => list_users(users_file),
    }
}
