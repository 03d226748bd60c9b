//! Command line console for the back-office API.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::Value;

use backoffice_console::auth::AuthContext;
use backoffice_console::controller::{ListOptions, PaginationController};
use backoffice_console::domain::resource::ResourceKind;
use backoffice_console::domain::types::{EntityId, PageNumber, PageSize, SortSpec};
use backoffice_console::models::config::ConsoleConfig;
use backoffice_console::pagination::PageLinks;
use backoffice_console::services::resources::{delete_by_kind, get_by_kind};
use backoffice_console::services::{ServiceError, ServiceResult};
use backoffice_console::{auth_context, http_fetcher};

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(version, about = "Digital-banking back-office console", long_about = None)]
struct Cli {
    /// Directory with `default.yaml` and per-environment overrides
    #[arg(long, env = "BACKOFFICE_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of a resource listing
    List {
        resource: ResourceKind,
        /// Parent id for nested resources (merchant of a contract)
        #[arg(long)]
        parent: Option<EntityId>,
        #[arg(long, default_value_t = PageNumber::FIRST)]
        page: PageNumber,
        #[arg(long)]
        size: Option<PageSize>,
        /// Sort expression such as `name,asc`
        #[arg(long)]
        sort: Option<SortSpec>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show a single row
    Get {
        resource: ResourceKind,
        id: EntityId,
        #[arg(long)]
        parent: Option<EntityId>,
    },
    /// Delete a single row
    Delete {
        resource: ResourceKind,
        id: EntityId,
        #[arg(long)]
        parent: Option<EntityId>,
    },
    /// Store the session token used for subsequent commands
    Login {
        #[arg(long, env = "BACKOFFICE_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long)]
        two_factor: Option<String>,
    },
    /// Forget the stored session tokens
    Logout,
}

fn render_links(links: &PageLinks) -> String {
    links
        .pages
        .iter()
        .map(|page| match page {
            Some(page) if *page == links.page => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

async fn execute(command: Command, config: &ConsoleConfig, auth: AuthContext) -> ServiceResult<()> {
    match command {
        Command::List {
            resource,
            parent,
            page,
            size,
            sort,
            search,
        } => {
            let endpoint = resource
                .collection_path(parent)
                .ok_or(ServiceError::MissingParent(resource))?;
            let options = ListOptions::new(sort.unwrap_or_else(|| config.default_sort.clone()))
                .page(page)
                .size(size.unwrap_or(config.page_size))
                .search(search);

            let fetcher = Arc::new(http_fetcher(config, auth)?);
            let controller =
                PaginationController::<Value, _>::open(fetcher, endpoint, options).await;

            if let Some(err) = controller.error() {
                return Err(err.into());
            }

            let links = controller.page_links();
            let rows = serde_json::to_string_pretty(&controller.state().data)?;
            println!("{rows}");
            println!(
                "{} rows, page {} of {}: {}",
                controller.total(),
                links.page,
                links.total_pages,
                render_links(&links)
            );
        }
        Command::Get {
            resource,
            id,
            parent,
        } => {
            let fetcher = http_fetcher(config, auth)?;
            let row: Value = get_by_kind(&fetcher, resource, parent, id).await?;
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
        Command::Delete {
            resource,
            id,
            parent,
        } => {
            let fetcher = http_fetcher(config, auth)?;
            delete_by_kind(&fetcher, resource, parent, id).await?;
            println!("Deleted {resource} {id}");
        }
        Command::Login { token, two_factor } => {
            if config.token_path.is_none() {
                log::warn!("token_path is not configured; the token will not outlive this process");
            }
            auth.sign_in(&token);
            if let Some(code) = two_factor {
                auth.set_two_factor_token(&code);
            }
        }
        Command::Logout => auth.sign_out(),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match ConsoleConfig::load(&cli.config_dir, &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading console config: {err}");
            std::process::exit(1);
        }
    };

    let auth = auth_context(&config);

    if let Err(err) = execute(cli.command, &config, auth).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}
