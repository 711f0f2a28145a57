use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard_api::{admins, projects, Collection, Dashboard, DashboardOptions};
use shared::{
    domain::{Admin, Device, InventoryItem, PrintMaterial, Project},
    error::{ApiError, ApiException},
    protocol::SearchRequest,
    Stage,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(about = "Inspect the seeded production dashboard")]
struct Cli {
    /// Seed for generated stock levels and telemetry.
    #[arg(long, default_value_t = DashboardOptions::default().seed)]
    seed: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of a collection.
    List(ListArgs),
    /// Walk a project through the given stages.
    Lifecycle {
        project_id: String,
        #[arg(required = true, value_parser = parse_stage)]
        stages: Vec<Stage>,
    },
    /// Admin totals.
    Summary,
    /// Scan for alerts as of a date (default today).
    Alerts {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        threshold: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    collection: CollectionArg,
    #[arg(long)]
    search: Option<String>,
    /// Restrict the search to these columns.
    #[arg(long = "field")]
    fields: Vec<String>,
    /// Column to sort by; repeat to toggle the direction.
    #[arg(long)]
    sort: Vec<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CollectionArg {
    Admins,
    Devices,
    Projects,
    Inventory,
    PrintMaterials,
}

fn parse_stage(raw: &str) -> Result<Stage, String> {
    Stage::parse(raw).ok_or_else(|| format!("unknown stage '{raw}'"))
}

fn api(error: ApiError) -> ApiException {
    ApiException::from(error)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut options = DashboardOptions {
        seed: cli.seed,
        ..DashboardOptions::default()
    };
    if let Command::Alerts {
        threshold: Some(threshold),
        ..
    } = cli.command
    {
        options.low_material_threshold = threshold;
    }
    let mut dashboard = Dashboard::seeded(options);

    match cli.command {
        Command::List(args) => match args.collection {
            CollectionArg::Admins => print_list::<Admin>(&mut dashboard, &args)?,
            CollectionArg::Devices => print_list::<Device>(&mut dashboard, &args)?,
            CollectionArg::Projects => print_list::<Project>(&mut dashboard, &args)?,
            CollectionArg::Inventory => print_list::<InventoryItem>(&mut dashboard, &args)?,
            CollectionArg::PrintMaterials => print_list::<PrintMaterial>(&mut dashboard, &args)?,
        },
        Command::Lifecycle { project_id, stages } => {
            let view = projects::lifecycle(&dashboard, &project_id).map_err(api)?;
            println!("project {project_id}: {} ({}%)", view.status, view.progress);
            for stage in stages {
                let (view, previous) = projects::change_stage(&mut dashboard, &project_id, stage)
                    .map_err(api)
                    .with_context(|| format!("cannot move project {project_id} to {stage}"))?;
                println!("{previous} -> {stage}: {} ({}%)", view.status, view.progress);
            }
        }
        Command::Summary => {
            let summary = admins::summary(&dashboard);
            println!(
                "total={} active={} inactive={} super_admins={}",
                summary.total, summary.active, summary.inactive, summary.super_admins
            );
            match summary.latest_login {
                Some(login) => println!("latest login: {} at {}", login.name, login.at),
                None => println!("latest login: none"),
            }
        }
        Command::Alerts { date, .. } => {
            let now = Utc::now();
            let today = date.unwrap_or_else(|| now.date_naive());
            let raised = dashboard.scan_alerts(today, now);
            if raised.is_empty() {
                println!("no alerts as of {today}");
            }
            for alert in raised {
                println!("[{:?}] {}: {}", alert.kind, alert.title, alert.description);
            }
        }
    }

    Ok(())
}

fn print_list<C: Collection>(dashboard: &mut Dashboard, args: &ListArgs) -> Result<()> {
    if args.search.is_some() || !args.fields.is_empty() {
        let request = SearchRequest {
            term: args.search.clone().unwrap_or_default(),
            fields: (!args.fields.is_empty()).then(|| args.fields.clone()),
        };
        dashboard_api::search::<C>(dashboard, &request).map_err(api)?;
    }
    for key in &args.sort {
        let (direction, _) = dashboard_api::sort::<C>(dashboard, key).map_err(api)?;
        debug!(key = key.as_str(), ?direction, "sorted");
    }
    if args.page == 0 {
        bail!("pages start at 1");
    }
    let page = dashboard_api::go_to_page::<C>(dashboard, args.page);

    for row in &page.rows {
        println!("{}", serde_json::to_string(row)?);
    }
    println!(
        "{}: rows {}-{} of {}, page {}/{}",
        C::NAME,
        page.first_row(),
        page.last_row(),
        page.total_records,
        page.current_page,
        page.total_pages
    );
    Ok(())
}
