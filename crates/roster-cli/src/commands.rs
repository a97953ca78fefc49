use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::{Instrument, debug, info, info_span, trace, warn};

use roster_cli::config::RosterConfig;
use roster_cli::logging::redact_value;
use roster_cli::report::{ImportReport, UploadSummary};
use roster_cli::summary::{
    athletes_table, duplicates_table, mapping_table, metrics_table, print_import_summary,
};
use roster_ingest::{CsvTable, build_column_hints, read_csv_table};
use roster_map::{MappingState, field_specs, parse_override};
use roster_model::{ImportContext, MetricDefinition, MetricId, NewAthlete, OrganizationId};
use roster_reconcile::{ImportSession, Resolution, find_duplicates_in};
use roster_store::{AthleteDirectory, FileStore, UploadOptions, upload_records};

use crate::cli::{
    AddAthleteArgs, AddMetricArgs, AthletesCommand, Cli, ImportArgs, MapArgs, MetricsCommand,
    OnMissingArg, OutputArgs,
};
use crate::progress::UploadBar;

/// Config file values merged with command-line overrides.
pub struct Settings {
    pub config: RosterConfig,
    pub store_dir: PathBuf,
    pub organization: OrganizationId,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config = RosterConfig::load(cli.config.as_deref())?;
        let store_dir = cli.store.clone().unwrap_or_else(|| config.store_dir.clone());
        let Some(org) = cli.org.clone().or_else(|| config.organization.clone()) else {
            bail!("no organization: pass --org or set organization in roster.toml");
        };
        let organization = OrganizationId::new(org).context("invalid organization id")?;
        Ok(Self {
            config,
            store_dir,
            organization,
        })
    }

    fn open_store(&self) -> Result<FileStore> {
        FileStore::open(&self.store_dir)
            .with_context(|| format!("open store {}", self.store_dir.display()))
    }

    fn context(&self) -> ImportContext {
        ImportContext::new(self.organization.clone())
    }
}

fn load_table(path: &std::path::Path) -> Result<CsvTable> {
    read_csv_table(path).with_context(|| format!("read {}", path.display()))
}

fn build_mapping(
    store: &FileStore,
    ctx: &ImportContext,
    table: &CsvTable,
    overrides: &[String],
) -> Result<MappingState> {
    let metrics = store
        .list_metrics(ctx)
        .context("load metric definitions")?;
    let mut state = MappingState::new(table.headers.clone(), field_specs(&metrics));
    for raw in overrides {
        let (header, field) = parse_override(raw)?;
        state
            .apply_override(&header, &field)
            .with_context(|| format!("apply --map {raw}"))?;
    }
    let summary = state.summary();
    debug!(
        columns = summary.total_columns,
        mapped = summary.mapped,
        metrics = summary.metric_columns,
        "column mapping ready"
    );
    Ok(state)
}

fn upload_options(args: &ImportArgs, config: &RosterConfig) -> UploadOptions {
    let mut options = config.upload;
    if let Some(size) = args.batch_size {
        options.batch_size = size.max(1);
    }
    if let Some(n) = args.max_in_flight {
        options.max_in_flight = n.max(1);
    }
    options
}

pub async fn run_import(args: &ImportArgs, settings: &Settings, quiet: bool) -> Result<ImportReport> {
    let span = info_span!("import", file = %args.mapping.file.display());
    import(args, settings, quiet).instrument(span).await
}

async fn import(args: &ImportArgs, settings: &Settings, quiet: bool) -> Result<ImportReport> {
    let file = &args.mapping.file;
    let table = load_table(file)?;
    let store = settings.open_store()?;
    let mut ctx = settings.context();
    if let Some(date) = args.default_date {
        ctx = ctx.with_default_date(date);
    }
    if let Some(notes) = args
        .notes
        .clone()
        .or_else(|| settings.config.default_notes.clone())
    {
        ctx = ctx.with_default_notes(notes);
    }

    let state = build_mapping(&store, &ctx, &table, &args.mapping.overrides)?;
    let rows = table.rows.len();
    let truncated_rows = table.truncated_rows.clone();
    let mut session =
        ImportSession::from_state(&store, ctx.clone(), table, &state).context("prepare import")?;

    let (reconciliation, created) = if args.on_missing == OnMissingArg::Create && !args.dry_run {
        let outcome = session
            .apply_resolutions(&store, |row| {
                trace!(
                    first = redact_value(&row.first_name),
                    last = redact_value(&row.last_name),
                    "creating athlete"
                );
                Resolution::Create
            })
            .context("create missing athletes")?;
        (outcome.reconciliation, outcome.resolution.created)
    } else {
        (session.reconcile(), Vec::new())
    };
    for issue in &reconciliation.issues {
        info!(row = issue.row_number, reason = %issue.reason, "row skipped");
    }

    let upload = if args.dry_run {
        None
    } else {
        let options = upload_options(args, &settings.config);
        let cancel = Arc::new(AtomicBool::new(false));
        let watcher = {
            let cancel = Arc::clone(&cancel);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("cancelling upload");
                    cancel.store(true, Ordering::Relaxed);
                }
            })
        };
        let bar = UploadBar::new(reconciliation.resolved.len(), quiet);
        let report = upload_records(
            &store,
            &ctx,
            &reconciliation.resolved,
            &options,
            &cancel,
            &bar,
        )
        .await;
        bar.finish();
        watcher.abort();
        Some(UploadSummary::from(&report))
    };

    Ok(ImportReport {
        file: file.clone(),
        organization: settings.organization.to_string(),
        rows,
        dry_run: args.dry_run,
        truncated_rows,
        reconciliation,
        created,
        upload,
    })
}

pub fn print_import(report: &ImportReport, output: OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_import_summary(report);
    }
    Ok(())
}

pub fn run_map(args: &MapArgs, settings: &Settings) -> Result<()> {
    let table = load_table(&args.mapping.file)?;
    let store = settings.open_store()?;
    let state = build_mapping(&store, &settings.context(), &table, &args.mapping.overrides)?;
    let missing = state.missing_required();

    if args.output.json {
        let columns: Vec<_> = state
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                json!({
                    "column": col,
                    "header": header,
                    "field": state.field_for(col).map(|key| key.as_key().to_string()),
                })
            })
            .collect();
        let value = json!({ "columns": columns, "missing_required": missing });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let hints = build_column_hints(&table);
        println!("{}", mapping_table(&state, &hints));
        if !missing.is_empty() {
            println!("Missing required fields: {}", missing.join(", "));
        }
    }
    Ok(())
}

pub fn run_duplicates(output: OutputArgs, settings: &Settings) -> Result<usize> {
    let store = settings.open_store()?;
    let groups = find_duplicates_in(&store, &settings.context()).context("load roster")?;
    if output.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else if groups.is_empty() {
        println!("No likely duplicates found.");
    } else {
        println!("{}", duplicates_table(&groups));
    }
    Ok(groups.len())
}

pub fn run_athletes(command: &AthletesCommand, settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    let ctx = settings.context();
    match command {
        AthletesCommand::List(output) => {
            let athletes = store.list_athletes(&ctx).context("load roster")?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&athletes)?);
            } else {
                println!("{}", athletes_table(&athletes));
            }
        }
        AthletesCommand::Add(args) => {
            let entry = store
                .create_athlete(&ctx, new_athlete(args))
                .context("create athlete")?;
            println!("Added athlete {} ({})", entry.id, entry.display_name());
        }
    }
    Ok(())
}

fn new_athlete(args: &AddAthleteArgs) -> NewAthlete {
    NewAthlete {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        pin: args.pin.clone(),
        team_ids: args.teams.clone(),
    }
}

pub fn run_metrics(command: &MetricsCommand, settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    let ctx = settings.context();
    match command {
        MetricsCommand::List(output) => {
            let metrics = store.list_metrics(&ctx).context("load metrics")?;
            if output.json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("{}", metrics_table(&metrics));
            }
        }
        MetricsCommand::Add(args) => {
            let metric = metric_definition(args)?;
            let id = metric.id.clone();
            store.upsert_metric(&ctx, metric).context("save metric")?;
            println!("Saved metric {id}");
        }
    }
    Ok(())
}

fn metric_definition(args: &AddMetricArgs) -> Result<MetricDefinition> {
    let id = MetricId::new(args.id.clone()).context("invalid metric id")?;
    let mut metric = MetricDefinition::new(id, args.name.trim(), args.unit.trim());
    metric.lower_is_better = args.lower_is_better;
    Ok(metric)
}
