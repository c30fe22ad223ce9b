use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client_core::{
    config::{load_config, ConsoleConfig},
    forms::{PartnerDraft, RejectionDraft, ReplyDraft},
    AdminApi, ContactMessages, ControllerOptions, EntityKind, FileCredentialStore, FilterDimension,
    HttpAdminApi, InfluencerApplications, InfluencerPartners, ListController, LogNotifier,
    Notification, Notifier, PageQuery, RecordStatus, Session,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use shared::domain::RecordId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "admin-console", about = "Back-office console for the admin API")]
struct Cli {
    /// TOML config file; `console.toml` is read when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Log filter, e.g. `debug` or `client_core=trace`. Falls back to RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Entity {
    Messages,
    Applications,
    Partners,
}

#[derive(Args, Debug, Clone)]
struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    follower_range: Option<String>,
}

impl ListArgs {
    fn query(&self) -> PageQuery {
        let mut query = PageQuery::page(self.page);
        if let Some(search) = &self.search {
            query = query.with_search(search.clone());
        }
        let filters = [
            (FilterDimension::Status, &self.status),
            (FilterDimension::Platform, &self.platform),
            (FilterDimension::FollowerRange, &self.follower_range),
        ];
        for (dimension, value) in filters {
            if let Some(value) = value {
                query = query.with_filter(dimension, value.clone());
            }
        }
        query
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stores the admin bearer token.
    Login {
        #[arg(long)]
        token: String,
    },
    Logout,
    List {
        entity: Entity,
        #[command(flatten)]
        list: ListArgs,
    },
    Show {
        entity: Entity,
        id: String,
    },
    /// Per-status counts over a bulk fetch.
    Metrics {
        entity: Entity,
    },
    SetStatus {
        entity: Entity,
        id: String,
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Delete {
        entity: Entity,
        id: String,
    },
    /// Writes the loaded page, or the bulk-fetched collection with `--all`, as CSV.
    Export {
        entity: Entity,
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        all: bool,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    Reply {
        id: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
    },
    ResendCredentials {
        id: String,
    },
    CreatePartner {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long = "platform", required = true)]
        platforms: Vec<String>,
        #[arg(long)]
        followers: Option<u64>,
    },
}

struct Console {
    api: Arc<dyn AdminApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    options: ControllerOptions,
}

impl Console {
    fn new(config: &ConsoleConfig) -> Result<Self> {
        let api = HttpAdminApi::new(&config.api_base_url, config.request_timeout())
            .context("failed to build admin API client")?;
        Ok(Self {
            api: Arc::new(api),
            session: Session::new(Arc::new(FileCredentialStore::new(
                config.credentials_path.clone(),
            ))),
            notifier: Arc::new(LogNotifier),
            options: ControllerOptions::from(config),
        })
    }

    fn controller<E: EntityKind>(&self) -> ListController<E> {
        ListController::builder(self.api.clone(), self.session.clone(), self.notifier.clone())
            .options(self.options.clone())
            .build()
    }
}

macro_rules! with_entity {
    ($entity:expr, $kind:ident => $body:expr) => {
        match $entity {
            Entity::Messages => {
                type $kind = ContactMessages;
                $body
            }
            Entity::Applications => {
                type $kind = InfluencerApplications;
                $body
            }
            Entity::Partners => {
                type $kind = InfluencerPartners;
                $body
            }
        }
    };
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn list<E: EntityKind>(console: &Console, args: &ListArgs) -> Result<()> {
    let controller = console.controller::<E>();
    controller.load(args.query()).await?;
    let snapshot = controller.snapshot().await;
    print_json(&json!({
        "currentPage": snapshot.page.current_page,
        "totalPages": snapshot.page.total_pages,
        "data": snapshot.records,
    }))
}

async fn show<E: EntityKind>(console: &Console, id: &str) -> Result<()> {
    let record = console
        .controller::<E>()
        .detail(&RecordId::new(id))
        .await?;
    print_json(&record)
}

async fn metrics<E: EntityKind>(console: &Console) -> Result<()> {
    let metrics = console.controller::<E>().compute_metrics().await?;
    let counts: Map<String, Value> = metrics
        .iter()
        .map(|(status, count)| (status.as_str().to_string(), json!(count)))
        .collect();
    print_json(&json!({ "total": metrics.total, "counts": counts }))
}

async fn set_status<E: EntityKind>(
    console: &Console,
    id: &str,
    status: &str,
    reason: Option<&str>,
) -> Result<()> {
    console
        .controller::<E>()
        .mutate_status_with_reason(&RecordId::new(id), status, reason)
        .await?;
    Ok(())
}

async fn delete<E: EntityKind>(console: &Console, id: &str) -> Result<()> {
    console
        .controller::<E>()
        .remove(&RecordId::new(id))
        .await?;
    Ok(())
}

async fn export<E: EntityKind>(
    console: &Console,
    args: &ListArgs,
    all: bool,
    out: &std::path::Path,
) -> Result<()> {
    let controller = console.controller::<E>();
    controller.load(args.query()).await?;
    if all {
        controller.load_bulk().await?;
    }
    let path = controller.export_to_file(out).await?;
    println!("{}", path.display());
    Ok(())
}

fn init_logging(cli: &Cli) {
    let env_filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url.clone() {
        config.api_base_url = api_url;
    }
    debug!(api = %config.api_base_url, "console: configuration loaded");
    let console = Console::new(&config)?;

    match cli.command {
        Command::Login { token } => {
            console.session.sign_in(&token)?;
            debug!(path = %config.credentials_path.display(), "console: admin token stored");
            console.notifier.notify(Notification::info("Signed in"));
        }
        Command::Logout => {
            console.session.sign_out()?;
            console.notifier.notify(Notification::info("Signed out"));
        }
        Command::List { entity, list: args } => {
            with_entity!(entity, K => list::<K>(&console, &args).await?)
        }
        Command::Show { entity, id } => with_entity!(entity, K => show::<K>(&console, &id).await?),
        Command::Metrics { entity } => with_entity!(entity, K => metrics::<K>(&console).await?),
        Command::SetStatus {
            entity,
            id,
            status,
            reason,
        } => with_entity!(entity, K => {
            set_status::<K>(&console, &id, &status, reason.as_deref()).await?
        }),
        Command::Delete { entity, id } => {
            with_entity!(entity, K => delete::<K>(&console, &id).await?)
        }
        Command::Export {
            entity,
            list: args,
            all,
            out,
        } => with_entity!(entity, K => export::<K>(&console, &args, all, &out).await?),
        Command::Reply {
            id,
            subject,
            message,
        } => {
            console
                .controller::<ContactMessages>()
                .reply(&RecordId::new(id), &ReplyDraft::new(subject, message))
                .await?
        }
        Command::Approve { id } => {
            console
                .controller::<InfluencerApplications>()
                .approve(&RecordId::new(id))
                .await?
        }
        Command::Reject { id, reason } => {
            console
                .controller::<InfluencerApplications>()
                .reject(&RecordId::new(id), &RejectionDraft::new(reason))
                .await?
        }
        Command::ResendCredentials { id } => {
            console
                .controller::<InfluencerPartners>()
                .resend_credentials(&RecordId::new(id))
                .await?
        }
        Command::CreatePartner {
            name,
            email,
            platforms,
            followers,
        } => {
            let draft = PartnerDraft {
                name,
                email,
                platforms,
                follower_count: followers,
            };
            console
                .controller::<InfluencerPartners>()
                .create(&draft)
                .await?
        }
    }

    Ok(())
}
