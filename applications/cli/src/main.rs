/// Employee CLI - manage employee records on a REST backend
use clap::{Parser, Subcommand};
use employee_cli::{
    config::CliConfig,
    error::CliError,
    prompt::{AssumeYes, StdinConfirm},
    render,
};
use employee_client::{Confirm, Dashboard, EmployeeClient, NewEmployee, RecordId, Removal};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Manage employee records on a REST backend", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the configuration file
    #[arg(long, global = true, env = "EMS_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all employees
    List,
    /// Find an employee by email. Without an email, lists everyone
    Find {
        #[arg(default_value = "")]
        email: String,
    },
    /// Show an employee's profile
    Profile { email: String },
    /// Add an employee
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Update an employee's name and/or email
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Delete an employee
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_cli=info,employee_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }
    config.validate()?;

    tracing::debug!("Backend: {}", config.api.base_url);

    let client = EmployeeClient::new(config.client_config())?;

    match cli.command {
        Commands::List => list(client).await?,
        Commands::Find { email } => find(client, &email).await?,
        Commands::Profile { email } => {
            let record = client.profile(&email).await?;
            println!("{}", render::profile(record.as_ref()));
        }
        Commands::Create {
            name,
            email,
            password,
        } => create(client, NewEmployee::new(name, email, password)).await?,
        Commands::Register {
            name,
            email,
            password,
        } => {
            let registration = client
                .register(&NewEmployee::new(name, email, password))
                .await?;
            println!("{}", registration);
        }
        Commands::Update { id, name, email } => update(client, &id, name, email).await?,
        Commands::Delete { id, yes } => {
            let confirm: &dyn Confirm = if yes { &AssumeYes } else { &StdinConfirm };
            delete(client, &id, confirm).await?;
        }
    }

    Ok(())
}

fn check(dashboard: &Dashboard) -> Result<(), CliError> {
    match dashboard.error() {
        Some(message) => Err(CliError::Operation(message.to_string())),
        None => Ok(()),
    }
}

async fn list(client: EmployeeClient) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client);
    dashboard.reload().await;
    check(&dashboard)?;

    println!("{}", render::table(dashboard.records()));
    Ok(())
}

async fn find(client: EmployeeClient, email: &str) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client);
    dashboard.search(email).await;
    check(&dashboard)?;

    if email.trim().is_empty() {
        println!("{}", render::table(dashboard.records()));
    } else {
        println!("{}", render::search(dashboard.search_result()));
    }
    Ok(())
}

async fn create(client: EmployeeClient, fields: NewEmployee) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client);
    *dashboard.create_form_mut() = fields;
    dashboard.create().await;
    check(&dashboard)?;

    println!("{}", render::table(dashboard.records()));
    Ok(())
}

async fn update(
    client: EmployeeClient,
    id: &str,
    name: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client);

    // Both fields are always sent, so start from the current values.
    dashboard.reload().await;
    check(&dashboard)?;

    let wanted = RecordId::parse(id);
    let record = dashboard
        .records()
        .iter()
        .find(|r| r.id().is_some() && r.id() == wanted)
        .cloned()
        .ok_or_else(|| CliError::UnknownEmployee(id.to_string()))?;

    dashboard.begin_edit(&record);
    if let Some(draft) = dashboard.edit_draft_mut() {
        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(email) = email {
            draft.email = email;
        }
    }

    dashboard.save_edit().await;
    check(&dashboard)?;

    if let Some(updated) = dashboard
        .records()
        .iter()
        .find(|r| r.id().is_some() && r.id() == wanted)
    {
        println!("{}", render::row(updated));
    }
    Ok(())
}

async fn delete(client: EmployeeClient, id: &str, confirm: &dyn Confirm) -> anyhow::Result<()> {
    match client.remove(id, confirm).await? {
        Removal::Deleted => println!("Deleted {}", id),
        Removal::Declined => println!("Cancelled"),
    }
    Ok(())
}
