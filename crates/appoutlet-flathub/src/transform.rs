use appoutlet::{Application, ApplicationId, ApplicationStore, PackageType};
use tracing::warn;

use crate::models::{FlathubApplicationDetails, FlathubCategory, FlathubScreenshot};

/// Host serving Flathub icons and `.flatpakref` files. The API hands out
/// paths relative to it.
pub const CONTENT_MANAGER_DOMAIN: &str = "https://dl.flathub.org";

pub const STORE: ApplicationStore = ApplicationStore::Flathub;
pub const PACKAGE_TYPE: PackageType = PackageType::Flatpak;

/// Map Flathub metadata onto the local application schema.
///
/// Pure apart from logging a warning for each URL that cannot be
/// resolved. The view count is always left absent.
pub fn to_application(details: &FlathubApplicationDetails) -> Application {
    let app_id = details.flatpak_app_id.as_str();

    Application {
        id: ApplicationId::new(app_id),
        name: details.name.clone(),
        summary: details.summary.clone(),
        description: details.description.clone(),
        developer: details.developer_name.clone(),
        license: details.project_license.clone(),
        homepage: details.homepage_url.clone(),
        bugtracker_url: details.bugtracker_url.clone(),
        donation_url: details.donation_url.clone(),
        icon: resolve_content_url(app_id, details.icon_desktop_url.as_deref()),
        download_url: resolve_content_url(app_id, details.download_flatpak_ref_url.as_deref()),
        version: details.current_release_version.clone(),
        last_release_date: details.current_release_date.clone(),
        creation_date: details.in_store_since_date.clone(),
        tags: extract_tags(details.categories.as_deref()),
        screenshots: extract_screenshots(details.screenshots.as_deref()),
        store: STORE,
        package_type: PACKAGE_TYPE,
        view_count: None,
    }
}

/// Prefix a content-manager path with its host.
///
/// Only non-blank values starting with `/` are accepted; anything else
/// (absolute URLs included) is dropped.
pub fn resolve_content_url(app_id: &str, uri: Option<&str>) -> Option<String> {
    match uri {
        Some(path) if is_content_path(path) => Some(format!("{CONTENT_MANAGER_DOMAIN}{path}")),
        _ => {
            warn!(app_id, uri = ?uri, "Invalid URI");
            None
        }
    }
}

fn is_content_path(uri: &str) -> bool {
    !uri.trim().is_empty() && uri.starts_with('/')
}

pub fn extract_tags(categories: Option<&[FlathubCategory]>) -> Vec<String> {
    categories
        .unwrap_or_default()
        .iter()
        .map(|category| category.name.clone())
        .collect()
}

/// Desktop screenshot URLs in source order. Entries without one are skipped.
pub fn extract_screenshots(screenshots: Option<&[FlathubScreenshot]>) -> Vec<String> {
    screenshots
        .unwrap_or_default()
        .iter()
        .filter_map(|screenshot| screenshot.img_desktop_url.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber that records WARN and above as plain text.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        (result, output)
    }

    fn category(name: &str) -> FlathubCategory {
        FlathubCategory {
            name: name.to_owned(),
        }
    }

    fn screenshot(desktop: Option<&str>) -> FlathubScreenshot {
        FlathubScreenshot {
            img_desktop_url: desktop.map(str::to_owned),
            img_mobile_url: Some("https://img/mobile.png".into()),
            thumb_url: None,
        }
    }

    fn gimp_details() -> FlathubApplicationDetails {
        FlathubApplicationDetails {
            flatpak_app_id: "org.gimp.GIMP".into(),
            name: Some("GNU Image Manipulation Program".into()),
            summary: Some("Create images and edit photographs".into()),
            description: Some("<p>GIMP is an image editor.</p>".into()),
            developer_name: Some("The GIMP team".into()),
            project_license: Some("GPL-3.0+".into()),
            homepage_url: Some("https://www.gimp.org/".into()),
            bugtracker_url: Some("https://gitlab.gnome.org/GNOME/gimp/issues".into()),
            donation_url: Some("https://www.gimp.org/donating/".into()),
            icon_desktop_url: Some("/repo/appstream/x86_64/icons/128x128/org.gimp.GIMP.png".into()),
            download_flatpak_ref_url: Some("/repo/appstream/org.gimp.GIMP.flatpakref".into()),
            current_release_version: Some("2.10.34".into()),
            current_release_date: Some("2023-02-21".into()),
            in_store_since_date: Some("2017-11-08".into()),
            categories: Some(vec![category("Graphics"), category("2DGraphics")]),
            screenshots: Some(vec![
                screenshot(Some("https://img/1.png")),
                screenshot(Some("https://img/2.png")),
            ]),
        }
    }

    #[test]
    fn copies_fields_one_to_one() {
        let app = to_application(&gimp_details());

        assert_eq!(app.id, ApplicationId::new("org.gimp.GIMP"));
        assert_eq!(app.name.as_deref(), Some("GNU Image Manipulation Program"));
        assert_eq!(app.summary.as_deref(), Some("Create images and edit photographs"));
        assert_eq!(app.description.as_deref(), Some("<p>GIMP is an image editor.</p>"));
        assert_eq!(app.developer.as_deref(), Some("The GIMP team"));
        assert_eq!(app.license.as_deref(), Some("GPL-3.0+"));
        assert_eq!(app.homepage.as_deref(), Some("https://www.gimp.org/"));
        assert_eq!(
            app.bugtracker_url.as_deref(),
            Some("https://gitlab.gnome.org/GNOME/gimp/issues")
        );
        assert_eq!(app.donation_url.as_deref(), Some("https://www.gimp.org/donating/"));
        assert_eq!(app.version.as_deref(), Some("2.10.34"));
        assert_eq!(app.last_release_date.as_deref(), Some("2023-02-21"));
        assert_eq!(app.creation_date.as_deref(), Some("2017-11-08"));
        assert_eq!(app.store, ApplicationStore::Flathub);
        assert_eq!(app.package_type, PackageType::Flatpak);
        assert_eq!(app.view_count, None);
    }

    #[test]
    fn prefixes_relative_urls_with_content_domain() {
        let app = to_application(&gimp_details());

        assert_eq!(
            app.icon.as_deref(),
            Some("https://dl.flathub.org/repo/appstream/x86_64/icons/128x128/org.gimp.GIMP.png")
        );
        assert_eq!(
            app.download_url.as_deref(),
            Some("https://dl.flathub.org/repo/appstream/org.gimp.GIMP.flatpakref")
        );
    }

    #[test]
    fn resolves_flatpak_path() {
        assert_eq!(
            resolve_content_url("x", Some("/foo/bar.flatpak")).as_deref(),
            Some("https://dl.flathub.org/foo/bar.flatpak")
        );
    }

    #[test]
    fn drops_urls_not_starting_with_slash() {
        assert_eq!(resolve_content_url("x", Some("https://evil.example/bar.flatpak")), None);
        assert_eq!(resolve_content_url("x", Some("foo/bar.flatpak")), None);
        assert_eq!(resolve_content_url("x", Some("")), None);
        assert_eq!(resolve_content_url("x", Some("   ")), None);
        assert_eq!(resolve_content_url("x", None), None);
    }

    #[test]
    fn invalid_uri_is_logged_as_warning() {
        let (resolved, logs) = capture_warnings(|| {
            resolve_content_url("org.example.Broken", Some("foo/bar.flatpak"))
        });

        assert_eq!(resolved, None);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Invalid URI"), "{logs}");
        assert!(logs.contains("foo/bar.flatpak"), "{logs}");
        assert!(logs.contains("org.example.Broken"), "{logs}");
    }

    #[test]
    fn missing_uri_is_logged_as_warning() {
        let (resolved, logs) = capture_warnings(|| resolve_content_url("org.example.Bare", None));

        assert_eq!(resolved, None);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Invalid URI"), "{logs}");
    }

    #[test]
    fn valid_path_logs_nothing() {
        let (resolved, logs) = capture_warnings(|| {
            resolve_content_url("org.gimp.GIMP", Some("/repo/gimp.flatpakref"))
        });

        assert!(resolved.is_some());
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn invalid_icon_does_not_affect_download_url() {
        let mut details = gimp_details();
        details.icon_desktop_url = Some("icons/gimp.png".into());

        let app = to_application(&details);
        assert_eq!(app.icon, None);
        assert!(app.download_url.is_some());
    }

    #[test]
    fn tags_follow_category_order() {
        let app = to_application(&gimp_details());
        assert_eq!(app.tags, vec!["Graphics", "2DGraphics"]);
    }

    #[test]
    fn absent_categories_yield_no_tags() {
        let mut details = gimp_details();
        details.categories = None;
        assert!(to_application(&details).tags.is_empty());

        details.categories = Some(vec![]);
        assert!(to_application(&details).tags.is_empty());
    }

    #[test]
    fn screenshots_skip_entries_without_desktop_image() {
        let mut details = gimp_details();
        details.screenshots = Some(vec![
            screenshot(Some("https://img/1.png")),
            screenshot(None),
            screenshot(Some("https://img/3.png")),
        ]);

        let app = to_application(&details);
        assert_eq!(app.screenshots, vec!["https://img/1.png", "https://img/3.png"]);
    }

    #[test]
    fn absent_screenshots_yield_empty_list() {
        let mut details = gimp_details();
        details.screenshots = None;
        assert!(to_application(&details).screenshots.is_empty());
    }

    #[test]
    fn transform_is_deterministic() {
        let details = gimp_details();
        assert_eq!(to_application(&details), to_application(&details));
    }
}
