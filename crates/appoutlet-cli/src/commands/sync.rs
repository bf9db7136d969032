use anyhow::{Context, Result};
use appoutlet::{ApplicationRepository, Feedback, Synchronizer};
use appoutlet_flathub::{FlathubCatalog, FlathubSynchronizer, transform};
use appoutlet_store::ApplicationDatabase;

/// Print feedback items to stderr.
pub fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        eprintln!("{item}");
    }
}

/// Run a Flathub synchronization and print the outcome.
pub async fn run<C: FlathubCatalog, R: ApplicationRepository>(
    synchronizer: &FlathubSynchronizer<C, R>,
    database: &ApplicationDatabase,
) -> Result<()> {
    let Some(report) = synchronizer
        .run()
        .await
        .context("Flathub synchronization failed")?
    else {
        println!(
            "Synchronization for {} is disabled; skipped.",
            synchronizer.label()
        );
        return Ok(());
    };

    print_feedback(&report.feedback);

    if report.refreshed_data() {
        database
            .record_sync(&transform::STORE)
            .context("failed to record synchronization time")?;
    } else {
        eprintln!("warning: every application failed; synchronization time not recorded");
    }

    println!(
        "Synchronized {} applications from {} ({} failed).",
        report.synced,
        synchronizer.label(),
        report.failed
    );

    Ok(())
}
