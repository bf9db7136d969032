use anyhow::Result;
use appoutlet::{ApplicationRepository, ApplicationService};

use super::format;

pub async fn run<R: ApplicationRepository>(service: &ApplicationService<R>) -> Result<()> {
    let applications = service.find_all().await?;

    if applications.is_empty() {
        println!("No applications stored yet. Run `appoutlet sync` first.");
        return Ok(());
    }

    format::print_application_table(&applications);
    Ok(())
}
