use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use tracing::{info, info_span};

use crm_cli::pipeline::{ImportPlan, execute_plan, load_table, plan_import, resolve_mappings};
use crm_import::{ActorId, ImportOptions, InMemoryStore, LookupCache, StoreSnapshot};
use crm_ingest::write_template;
use crm_map::{MappingProfile, MappingState};
use crm_validate::ValidationOptions;

use crate::cli::{
    ImportArgs, MapArgs, MappingArgs, OutputFormatArg, PreviewArgs, TemplateArgs, ValidationArgs,
};
use crate::summary::{print_import, print_mappings, print_preview, print_validation};

/// Returns `false` when the mapping set is incomplete.
pub fn run_map(args: &MapArgs) -> Result<bool> {
    let (_, state) = load_and_map(&args.mapping)?;
    let validation = state.validate();

    if let Some(path) = &args.save_profile {
        MappingProfile::from_state(&state).save(path)?;
        info!(path = %path.display(), "Saved mapping profile");
    }

    match args.mapping.format {
        OutputFormatArg::Table => print_mappings(&state, &validation),
        OutputFormatArg::Json => print_json(&serde_json::json!({
            "mappings": state.mappings(),
            "validation": validation,
        }))?,
    }
    Ok(validation.is_valid)
}

/// Returns `false` when the mapping set is incomplete.
pub fn run_preview(args: &PreviewArgs) -> Result<bool> {
    let (table, state) = load_and_map(&args.mapping)?;
    let Some(plan) = plan_or_report(&table, &state, &args.validation, args.mapping.format)? else {
        return Ok(false);
    };
    match args.mapping.format {
        OutputFormatArg::Table => {
            print_preview(&plan.preview, plan.groups.len(), plan.contact_count());
        }
        OutputFormatArg::Json => print_json(&plan)?,
    }
    Ok(true)
}

/// Returns `false` when the mapping is incomplete or any batch failed.
pub fn run_import(args: &ImportArgs) -> Result<bool> {
    let span = info_span!("import", csv = %args.mapping.csv.display());
    let _guard = span.enter();

    let (table, state) = load_and_map(&args.mapping)?;
    let Some(plan) = plan_or_report(&table, &state, &args.validation, args.mapping.format)? else {
        return Ok(false);
    };

    if args.dry_run {
        match args.mapping.format {
            OutputFormatArg::Table => {
                print_preview(&plan.preview, plan.groups.len(), plan.contact_count());
                println!("Dry run: nothing written to {}", args.store.display());
            }
            OutputFormatArg::Json => print_json(&plan)?,
        }
        return Ok(true);
    }

    let snapshot = StoreSnapshot::load(&args.store)?;
    let actor = args.actor.as_deref().map(ActorId::new);
    let mut store = InMemoryStore::from_snapshot(snapshot, actor);
    let mut cache = LookupCache::default();
    let options = ImportOptions {
        batch_size: args.batch_size,
        duplicate_policy: args.duplicates.into(),
    };

    let bar = progress_bar(args.mapping.format == OutputFormatArg::Table);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("start async runtime")?;
    let result = runtime.block_on(execute_plan(
        plan,
        &mut store,
        options,
        Some(&mut cache),
        |progress| bar.set_position(u64::from(progress.percent)),
    ));
    bar.finish_and_clear();

    if result.organizations_created > 0 {
        store.snapshot().save(&args.store)?;
    }

    match args.mapping.format {
        OutputFormatArg::Table => print_import(&result),
        OutputFormatArg::Json => print_json(&result)?,
    }
    Ok(result.success)
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create template {}", path.display()))?;
            write_template(BufWriter::new(file))?;
            info!(path = %path.display(), "Wrote template");
        }
        None => write_template(io::stdout().lock())?,
    }
    Ok(())
}

fn load_and_map(args: &MappingArgs) -> Result<(crm_ingest::CsvTable, MappingState)> {
    let table = load_table(&args.csv, args.strict_template)?;
    let state = resolve_mappings(&table.headers, args.profile.as_deref(), &args.overrides)?;
    Ok((table, state))
}

/// Plan the import, or print the mapping problems and return `None`.
fn plan_or_report(
    table: &crm_ingest::CsvTable,
    state: &MappingState,
    args: &ValidationArgs,
    format: OutputFormatArg,
) -> Result<Option<ImportPlan>> {
    let validation = state.validate();
    if !validation.is_valid {
        match format {
            OutputFormatArg::Table => print_validation(&validation),
            OutputFormatArg::Json => print_json(&serde_json::json!({ "mapping": validation }))?,
        }
        return Ok(None);
    }
    let options = if args.lenient_email {
        ValidationOptions::lenient()
    } else {
        ValidationOptions::default()
    };
    plan_import(table, state, options, args.sample).map(Some)
}

fn progress_bar(visible: bool) -> ProgressBar {
    let bar = ProgressBar::new(100);
    if !visible {
        bar.set_draw_target(ProgressDrawTarget::hidden());
        return bar;
    }
    if let Ok(style) =
        ProgressStyle::with_template("{prefix:10} {spinner:.dim} [{bar:30}] {percent:>3}%")
    {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar.set_prefix("Importing");
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("serialize output")?;
    writeln!(stdout)?;
    Ok(())
}
