use serde::Deserialize;

/// One entry of the Flathub application listing.
/// `GET /api/v1/apps`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlathubApplicationSummary {
    pub flatpak_app_id: String,
    pub name: Option<String>,
    pub summary: Option<String>,
}

/// Full metadata for one Flathub application.
/// `GET /api/v1/apps/{flatpakAppId}`
///
/// Flathub omits or nulls fields freely, so everything except the id is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlathubApplicationDetails {
    pub flatpak_app_id: String,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub developer_name: Option<String>,
    pub project_license: Option<String>,
    pub homepage_url: Option<String>,
    pub bugtracker_url: Option<String>,
    pub donation_url: Option<String>,
    pub icon_desktop_url: Option<String>,
    pub download_flatpak_ref_url: Option<String>,
    pub current_release_version: Option<String>,
    pub current_release_date: Option<String>,
    pub in_store_since_date: Option<String>,
    pub categories: Option<Vec<FlathubCategory>>,
    pub screenshots: Option<Vec<FlathubScreenshot>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlathubCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlathubScreenshot {
    pub img_desktop_url: Option<String>,
    pub img_mobile_url: Option<String>,
    pub thumb_url: Option<String>,
}
