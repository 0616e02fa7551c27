use super::render::{print_messages, print_resume};
use super::setup::{BulletCommands, Cli, Commands, ContactCommands};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitae::api::VitaeApi;
use vitae::commands::{CmdMessage, CmdResult, FieldPath};
use vitae::config::VitaeConfig;
use vitae::error::{Result, VitaeError};
use vitae::export::{exporter_for, ExportFormat, MarkdownLayout};
use vitae::model::{Collection, EntryId, IconType, UuidIds};
use vitae::reorder::{DragEvent, DragHandle};
use vitae::store::fs_backend::FsBackend;
use vitae::store::{DataStore, FileStore};

struct AppContext {
    api: VitaeApi<FileStore>,
    config: VitaeConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Show { json }) => handle_show(&ctx, json),
        Some(Commands::Set { path, value }) => handle_set(&mut ctx, &path, value),
        Some(Commands::Add { collection }) => handle_add(&mut ctx, collection),
        Some(Commands::Delete { collection, id }) => handle_delete(&mut ctx, collection, id),
        Some(Commands::Move {
            collection,
            from,
            to,
        }) => handle_move(&mut ctx, collection, from, to),
        Some(Commands::Drag { active, over }) => handle_drag(&mut ctx, &active, over.as_deref()),
        Some(Commands::Bullet { action }) => handle_bullet(&mut ctx, action),
        Some(Commands::Dates {
            collection,
            id,
            start,
            end,
            current,
        }) => handle_dates(&mut ctx, collection, id, start, end, current),
        Some(Commands::Contact { action }) => handle_contact(&mut ctx, action),
        Some(Commands::Export {
            format,
            output,
            layout,
        }) => handle_export(&ctx, format, output, layout),
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes),
        Some(Commands::Config) => handle_config(&ctx),
        None => handle_show(&ctx, false),
    }
}

/// Logs go to stderr so stdout stays clean for `show --json` and `export -o -`.
/// `VITAE_LOG` takes precedence over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env("VITAE_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = VitaeConfig::load()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let store = FileStore::with_backend(FsBackend::new(config.data_dir()))
        .with_key(config.storage_key.clone());
    tracing::debug!(location = %store.location().display(), "opening resume");
    let api = VitaeApi::open(store, Box::new(UuidIds));

    Ok(AppContext { api, config })
}

/// Prints the command's own messages, or a generic line when it has none.
fn report(result: &CmdResult, done: &str, noop: &str) {
    if result.messages.is_empty() {
        let fallback = if result.changed {
            CmdMessage::success(done)
        } else {
            CmdMessage::warning(noop)
        };
        print_messages(&[fallback]);
    } else {
        print_messages(&result.messages);
    }
}

/// Command-line positions start at 1.
fn position(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| VitaeError::Api("Positions start at 1".into()))
}

fn handle_show(ctx: &AppContext, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(ctx.api.document())?;
        println!("{}", out);
    } else {
        print_resume(ctx.api.document());
    }
    Ok(())
}

fn handle_set(ctx: &mut AppContext, path: &str, value: String) -> Result<()> {
    let field: FieldPath = path.parse().map_err(VitaeError::Api)?;
    let result = ctx.api.set_field(field, value);
    report(
        &result,
        &format!("Updated {}", path),
        &format!("Nothing to update at {}", path),
    );
    Ok(())
}

fn handle_add(ctx: &mut AppContext, collection: Collection) -> Result<()> {
    let result = ctx.api.add_entry(collection);
    report(&result, "Entry added", "Entry not added");
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, collection: Collection, id: String) -> Result<()> {
    let result = ctx.api.delete_entry(collection, EntryId::new(id.clone()));
    report(&result, "Entry deleted", &format!("No {} entry with id {}", collection, id));
    Ok(())
}

fn handle_move(ctx: &mut AppContext, collection: Collection, from: usize, to: usize) -> Result<()> {
    let result = ctx
        .api
        .reorder_entries(collection, position(from)?, position(to)?);
    report(&result, "Entry moved", "Nothing to move");
    Ok(())
}

fn handle_drag(ctx: &mut AppContext, active: &str, over: Option<&str>) -> Result<()> {
    let active: DragHandle = active.parse().map_err(VitaeError::Api)?;
    let event = match over {
        Some(over) => DragEvent::dropped(active, over.parse().map_err(VitaeError::Api)?),
        None => DragEvent::cancelled(active),
    };
    let result = ctx.api.drag(&event);
    report(&result, "Entry moved", "Drag ignored");
    Ok(())
}

fn handle_bullet(ctx: &mut AppContext, action: BulletCommands) -> Result<()> {
    let result = match action {
        BulletCommands::Add { collection, id } => {
            ctx.api.add_accomplishment(collection, EntryId::new(id))
        }
        BulletCommands::Set {
            collection,
            id,
            n,
            value,
        } => ctx
            .api
            .set_accomplishment(collection, EntryId::new(id), position(n)?, value),
        BulletCommands::Delete { collection, id, n } => {
            ctx.api
                .delete_accomplishment(collection, EntryId::new(id), position(n)?)
        }
    };
    report(&result, "Bullets updated", "No matching bullet");
    Ok(())
}

fn handle_dates(
    ctx: &mut AppContext,
    collection: Collection,
    id: String,
    start: String,
    end: Option<String>,
    current: bool,
) -> Result<()> {
    let result = ctx
        .api
        .set_date_range(collection, EntryId::new(id), start, end, current);
    report(&result, "Dates updated", "Dates unchanged");
    Ok(())
}

fn handle_contact(ctx: &mut AppContext, action: ContactCommands) -> Result<()> {
    match action {
        ContactCommands::Add { key } => {
            let result = ctx.api.add_contact_field(key.as_str());
            report(
                &result,
                "Contact added",
                &format!("Cannot add contact field: {}", key),
            );
        }
        ContactCommands::Remove { key } => {
            let result = ctx.api.remove_contact_field(key.as_str());
            report(&result, "Contact removed", &format!("No contact field: {}", key));
        }
        ContactCommands::Icon { key, icon } => {
            let icon = if icon.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(icon.parse::<IconType>().map_err(VitaeError::Api)?)
            };
            let result = ctx.api.set_contact_icon(key.as_str(), icon);
            report(&result, "Icon updated", "Icon unchanged");
        }
        ContactCommands::Suggest => {
            let keys = ctx.api.addable_contact_fields();
            if keys.is_empty() {
                print_messages(&[CmdMessage::info("All suggested contact fields are present")]);
            }
            for key in keys {
                println!("{}", key);
            }
        }
    }
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    format: ExportFormat,
    output: Option<PathBuf>,
    layout: MarkdownLayout,
) -> Result<()> {
    let exporter = exporter_for(format, layout);

    let path = match output {
        Some(path) if path.as_os_str() == "-" => {
            let bytes = ctx.api.render(exporter.as_ref())?;
            std::io::stdout().write_all(&bytes)?;
            return Ok(());
        }
        Some(path) if path.is_dir() => ctx.api.export_to_dir(exporter.as_ref(), &path)?,
        Some(path) => {
            let bytes = ctx.api.render(exporter.as_ref())?;
            std::fs::write(&path, bytes)
                .map_err(|e| VitaeError::Export(format!("{}: {}", path.display(), e)))?;
            path
        }
        None => ctx
            .api
            .export_to_dir(exporter.as_ref(), &ctx.config.export_dir())?,
    };

    print_messages(&[CmdMessage::success(format!(
        "Exported {} to {}",
        format,
        path.display()
    ))]);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        return Err(VitaeError::Api(
            "Reset discards the whole resume; pass --yes to confirm".into(),
        ));
    }
    let result = ctx.api.reset();
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    println!("data_dir    = {}", ctx.config.data_dir().display());
    println!("storage_key = {}", ctx.config.storage_key);
    println!("export_dir  = {}", ctx.config.export_dir().display());
    println!("document    = {}", ctx.api.location().display());
    Ok(())
}
