use anyhow::{Result, bail};
use appoutlet::{ApplicationId, ApplicationRepository, ApplicationService, ServiceError};

use super::format;

pub async fn run<R: ApplicationRepository>(
    service: &ApplicationService<R>,
    id: &str,
    json: bool,
) -> Result<()> {
    let app = match service.find_by_id(&ApplicationId::new(id)).await {
        Ok(app) => app,
        Err(ServiceError::ApplicationNotFound(_)) => bail!("Application not found: {id}"),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&app)?);
        return Ok(());
    }

    println!("ID:          {}", app.id);
    let fields = [
        ("Name", &app.name),
        ("Summary", &app.summary),
        ("Developer", &app.developer),
        ("License", &app.license),
        ("Version", &app.version),
        ("Released", &app.last_release_date),
        ("Added", &app.creation_date),
        ("Homepage", &app.homepage),
        ("Bug tracker", &app.bugtracker_url),
        ("Donate", &app.donation_url),
        ("Icon", &app.icon),
        ("Download", &app.download_url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{:<13}{value}", format!("{label}:"));
        }
    }
    if !app.tags.is_empty() {
        println!("Tags:        {}", app.tags.join(", "));
    }
    println!("Store:       {} ({})", app.store, app.package_type);
    println!("Views:       {}", format::views_label(app.views()));

    for screenshot in &app.screenshots {
        println!("Screenshot:  {screenshot}");
    }

    if let Some(description) = &app.description {
        println!();
        println!("{description}");
    }

    Ok(())
}
