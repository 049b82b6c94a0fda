//! Runs one CLI command against the services and writes the result.
//!
//! Every command mounts the store its page would mount, works through that
//! store, and closes it before returning.

use std::io::Write;

use anyhow::anyhow;
use errand_core::{
    AccountFilter, AccountPatch, ErrandFilter, ErrandPatch, ListStore, ServiceError, Services,
    Transport, ValueStore,
};
use tracing::info;

use crate::cli::{Command, ErrandsCommand, UsersCommand};
use crate::render;

/// Print the error panel and turn `message` into the command's error.
fn fail(out: &mut impl Write, message: String) -> anyhow::Result<()> {
    render::error_panel(out, &message)?;
    Err(anyhow!(message))
}

fn mutation<T>(out: &mut impl Write, result: Result<T, ServiceError>) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            render::error_panel(out, &err.to_string())?;
            Err(err.into())
        }
    }
}

pub async fn execute<T>(
    command: Command,
    services: &Services<T>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    T: Transport + ?Sized,
{
    match command {
        Command::Users(command) => users(command, services, out).await,
        Command::Errands(command) => errands(command, services, out).await,
        Command::Dashboard => dashboard(services, out).await,
    }
}

async fn users<T>(
    command: UsersCommand,
    services: &Services<T>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    T: Transport + ?Sized,
{
    info!("loading users");
    let store = ListStore::mount(services.accounts.clone()).await;
    if let Some(message) = store.error() {
        return fail(out, message);
    }

    let outcome: anyhow::Result<()> = async {
        match command {
            UsersCommand::List { search, role, status } => {
                let filter = AccountFilter {
                    search,
                    role,
                    activity: status,
                };
                let items = store.items();
                let shown = filter.apply(&items);
                render::accounts(out, &shown, items.len())?;
                Ok(())
            }
            UsersCommand::Activate { id } => {
                let account = mutation(out, store.update(&id, &AccountPatch::active(true)).await)?;
                writeln!(out, "Activated {} ({})", account.name, account.id)?;
                Ok(())
            }
            UsersCommand::Deactivate { id } => {
                let account = mutation(out, store.update(&id, &AccountPatch::active(false)).await)?;
                writeln!(out, "Deactivated {} ({})", account.name, account.id)?;
                Ok(())
            }
            UsersCommand::Delete { id } => {
                mutation(out, store.delete(&id).await)?;
                writeln!(out, "Deleted user {id}, {} remaining", store.len())?;
                Ok(())
            }
        }
    }
    .await;
    store.close();
    outcome
}

async fn errands<T>(
    command: ErrandsCommand,
    services: &Services<T>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    T: Transport + ?Sized,
{
    info!("loading errands");
    let store = ListStore::mount(services.errands.clone()).await;
    if let Some(message) = store.error() {
        return fail(out, message);
    }

    let outcome: anyhow::Result<()> = async {
        match command {
            ErrandsCommand::List { search, status } => {
                let filter = ErrandFilter { search, status };
                let items = store.items();
                let shown = filter.apply(&items);
                render::errands(out, &shown, items.len())?;
                Ok(())
            }
            ErrandsCommand::SetStatus { id, status } => {
                let errand = mutation(out, store.update(&id, &ErrandPatch::status(status)).await)?;
                writeln!(out, "{} is now {}", errand.title, errand.status.label())?;
                Ok(())
            }
            ErrandsCommand::Delete { id } => {
                mutation(out, store.delete(&id).await)?;
                writeln!(out, "Deleted errand {id}, {} remaining", store.len())?;
                Ok(())
            }
        }
    }
    .await;
    store.close();
    outcome
}

async fn dashboard<T>(services: &Services<T>, out: &mut impl Write) -> anyhow::Result<()>
where
    T: Transport + ?Sized,
{
    info!("loading dashboard");
    let (stats, recent) = tokio::join!(
        ValueStore::mount(services.dashboard.clone()),
        ListStore::mount(services.dashboard.recent()),
    );
    stats.close();
    recent.close();

    if let Some(message) = stats.error().or_else(|| recent.error()) {
        return fail(out, message);
    }
    if let Some(value) = stats.value() {
        render::stats(out, &value)?;
    }
    writeln!(out)?;
    writeln!(out, "Recent errands")?;
    let items = recent.items();
    let shown: Vec<_> = items.iter().collect();
    render::errands(out, &shown, items.len())?;
    Ok(())
}
