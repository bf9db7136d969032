use anyhow::{Result, bail};
use appoutlet::{ApplicationId, ApplicationRepository, ApplicationService, ServiceError};

use super::format;

/// Count one view of an application.
pub async fn run<R: ApplicationRepository>(service: &ApplicationService<R>, id: &str) -> Result<()> {
    match service.register_visualization(&ApplicationId::new(id)).await {
        Ok(app) => {
            println!("{}: {}", app.id, format::views_label(app.views()));
            Ok(())
        }
        Err(ServiceError::ApplicationNotFound(_)) => bail!("Application not found: {id}"),
        Err(e) => Err(e.into()),
    }
}
