//! Cloud Foundry V3 API CLI binary.
//!
//! A command-line interface for browsing and managing Cloud Foundry resources.

use std::process::ExitCode;
use std::time::Duration;

use cfapi::cli::{Cli, Command, Entity};
use cfapi::output::PrettyPrint;
use cfapi::{
    App, CfClient, CfError, Delete, Job, JobWaitOptions, ListFilter, ListPage, Organization,
    PageCursor, Resource, Role, Route, ServiceCredentialBinding, Space,
};
use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let client = match CfClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CF_API_URL and CF_ACCESS_TOKEN (see `cf oauth-token`)");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// How a `list` invocation should be fetched.
struct ListArgs {
    filter: ListFilter,
    cursor: PageCursor,
    all: bool,
    json: bool,
}

async fn run(client: &CfClient, cli: Cli) -> cfapi::Result<()> {
    match cli.command {
        Command::Get { entity, guid } => match entity {
            Entity::App => show::<App>(client, &guid, cli.json).await,
            Entity::Space => show::<Space>(client, &guid, cli.json).await,
            Entity::Organization => show::<Organization>(client, &guid, cli.json).await,
            Entity::Route => show::<Route>(client, &guid, cli.json).await,
            Entity::Role => show::<Role>(client, &guid, cli.json).await,
            Entity::ServiceCredentialBinding => {
                show::<ServiceCredentialBinding>(client, &guid, cli.json).await
            }
            Entity::Job => show::<Job>(client, &guid, cli.json).await,
        },
        Command::List {
            entity,
            page,
            per_page,
            all,
            name,
            space,
            org,
            label_selector,
        } => {
            let mut filter = ListFilter::new()
                .names(name)
                .space_guids(space)
                .organization_guids(org);
            if let Some(selector) = label_selector {
                filter = filter.label_selector(selector);
            }
            let args = ListArgs {
                filter,
                cursor: PageCursor::new(page.unwrap_or(1), per_page.unwrap_or(0)),
                all,
                json: cli.json,
            };

            match entity {
                Entity::App => list::<App, _, _>(client, &args, |r| AppRow::from(r)).await,
                Entity::Space => list::<Space, _, _>(client, &args, |r| SpaceRow::from(r)).await,
                Entity::Organization => {
                    list::<Organization, _, _>(client, &args, |r| OrganizationRow::from(r)).await
                }
                Entity::Route => list::<Route, _, _>(client, &args, |r| RouteRow::from(r)).await,
                Entity::Role => list::<Role, _, _>(client, &args, |r| RoleRow::from(r)).await,
                Entity::ServiceCredentialBinding => {
                    list::<ServiceCredentialBinding, _, _>(client, &args, |r| BindingRow::from(r))
                        .await
                }
                Entity::Job => Err(CfError::InvalidArgument(
                    "jobs cannot be listed; use 'cfapi get job <guid>'".to_string(),
                )),
            }
        }
        Command::Delete {
            entity,
            guid,
            wait,
            timeout,
        } => {
            let options = JobWaitOptions {
                timeout: Duration::from_secs(timeout),
                ..Default::default()
            };
            let wait = wait.then_some(options);
            match entity {
                Entity::App => remove::<App>(client, &guid, wait).await,
                Entity::Space => remove::<Space>(client, &guid, wait).await,
                Entity::Organization => remove::<Organization>(client, &guid, wait).await,
                Entity::Route => remove::<Route>(client, &guid, wait).await,
                Entity::Role => remove::<Role>(client, &guid, wait).await,
                Entity::ServiceCredentialBinding => {
                    remove::<ServiceCredentialBinding>(client, &guid, wait).await
                }
                Entity::Job => Err(CfError::InvalidArgument("jobs cannot be deleted".to_string())),
            }
        }
    }
}

async fn show<R>(client: &CfClient, guid: &str, json: bool) -> cfapi::Result<()>
where
    R: Resource + Serialize + PrettyPrint,
{
    let resource = client.resource::<R>().get(guid).await?;
    if json {
        println!("{}", to_json(&resource)?);
    } else {
        println!("{}", resource.pretty_print());
    }
    Ok(())
}

async fn list<R, Row, F>(client: &CfClient, args: &ListArgs, to_row: F) -> cfapi::Result<()>
where
    R: Resource + Serialize,
    Row: Tabled,
    F: Fn(&R) -> Row,
{
    let resources = client.resource::<R>();

    if args.all {
        let per_page = args.cursor.per_page().unwrap_or(client.per_page());
        let items = resources
            .pager(&args.filter, PageCursor::first_page(per_page))
            .collect_all()
            .await?;
        if args.json {
            println!("{}", to_json(&items)?);
        } else {
            let rows: Vec<Row> = items.iter().map(&to_row).collect();
            println!("{}", Table::new(rows));
            println!("\n{} total items", items.len());
        }
        return Ok(());
    }

    let page = resources.list(&args.filter, args.cursor).await?;
    output_page(&page, args, to_row)
}

fn output_page<R, Row, F>(page: &ListPage<R>, args: &ListArgs, to_row: F) -> cfapi::Result<()>
where
    R: Serialize,
    Row: Tabled,
    F: Fn(&R) -> Row,
{
    if args.json {
        println!("{}", to_json(&page.resources)?);
        return Ok(());
    }

    let rows: Vec<Row> = page.iter().map(to_row).collect();
    println!("{}", Table::new(rows));

    let current = args.cursor.page().unwrap_or(1);
    let pagination = &page.pagination;
    if pagination.has_next() {
        println!(
            "\nPage {}/{} ({} total items, more available)",
            current, pagination.total_pages, pagination.total_results
        );
    } else {
        println!(
            "\nPage {}/{} ({} total items)",
            current, pagination.total_pages, pagination.total_results
        );
    }
    Ok(())
}

async fn remove<R: Delete>(
    client: &CfClient,
    guid: &str,
    wait: Option<JobWaitOptions>,
) -> cfapi::Result<()> {
    let operation = client.resource::<R>().delete(guid).await?;

    match (operation.job_id().cloned(), wait) {
        (None, _) => println!("Deleted {} {}", R::KIND, guid),
        (Some(job), None) => println!("Deleting {} {} (job {})", R::KIND, guid, job),
        (Some(job), Some(options)) => {
            client.wait_for_job(&job, options).await?;
            println!("Deleted {} {} (job {})", R::KIND, guid, job);
        }
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> cfapi::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct AppRow {
    guid: String,
    name: String,
    state: String,
}

impl From<&App> for AppRow {
    fn from(app: &App) -> Self {
        Self {
            guid: app.guid.clone(),
            name: app.name.clone(),
            state: app.state.to_string(),
        }
    }
}

#[derive(Tabled)]
struct SpaceRow {
    guid: String,
    name: String,
    organization: String,
}

impl From<&Space> for SpaceRow {
    fn from(space: &Space) -> Self {
        Self {
            guid: space.guid.clone(),
            name: space.name.clone(),
            organization: space.organization_guid().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Tabled)]
struct OrganizationRow {
    guid: String,
    name: String,
    suspended: bool,
}

impl From<&Organization> for OrganizationRow {
    fn from(org: &Organization) -> Self {
        Self {
            guid: org.guid.clone(),
            name: org.name.clone(),
            suspended: org.suspended,
        }
    }
}

#[derive(Tabled)]
struct RouteRow {
    guid: String,
    url: String,
    destinations: usize,
}

impl From<&Route> for RouteRow {
    fn from(route: &Route) -> Self {
        Self {
            guid: route.guid.clone(),
            url: route.url.clone(),
            destinations: route.destinations.len(),
        }
    }
}

#[derive(Tabled)]
struct RoleRow {
    guid: String,
    #[tabled(rename = "type")]
    role_type: String,
    user: String,
    target: String,
}

impl From<&Role> for RoleRow {
    fn from(role: &Role) -> Self {
        let rel = &role.relationships;
        Self {
            guid: role.guid.clone(),
            role_type: role.role_type.as_str().to_string(),
            user: rel.user.guid().unwrap_or_default().to_string(),
            target: rel
                .space
                .guid()
                .or_else(|| rel.organization.guid())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Tabled)]
struct BindingRow {
    guid: String,
    name: String,
    #[tabled(rename = "type")]
    binding_type: String,
    state: String,
}

impl From<&ServiceCredentialBinding> for BindingRow {
    fn from(binding: &ServiceCredentialBinding) -> Self {
        Self {
            guid: binding.guid.clone(),
            name: binding.name.clone().unwrap_or_default(),
            binding_type: binding.binding_type.clone(),
            state: binding
                .last_operation
                .as_ref()
                .map(|op| op.state.clone())
                .unwrap_or_default(),
        }
    }
}
