use anyhow::{Context, Result};
use appoutlet_flathub::transform;
use appoutlet_store::{ApplicationDatabase, SyncStatus};

pub fn run(database: &ApplicationDatabase) -> Result<()> {
    let store = transform::STORE;
    let status = database
        .sync_status(&store)
        .context("could not read synchronization status")?;

    match status {
        SyncStatus::NeverSynced => println!("{store}: never synchronized"),
        SyncStatus::Fresh { days_old } => {
            println!("{store}: up to date (synchronized {days_old} day(s) ago)")
        }
        SyncStatus::Stale { days_old } => println!(
            "{store}: stale (synchronized {days_old} days ago). Run `appoutlet sync` to refresh."
        ),
    }

    Ok(())
}
