use appoutlet::Application;

const MAX_ID_WIDTH: usize = 40;
const MAX_NAME_WIDTH: usize = 35;

pub fn print_application_table(applications: &[Application]) {
    for line in application_rows(applications) {
        println!("{line}");
    }

    println!("\n{} applications", applications.len());
}

/// One aligned line per application: id, name, view count.
pub fn application_rows(applications: &[Application]) -> Vec<String> {
    let id_width = column_width(applications.iter().map(|a| a.id.as_str()), MAX_ID_WIDTH);
    let name_width = column_width(applications.iter().map(display_name), MAX_NAME_WIDTH);

    applications
        .iter()
        .map(|app| {
            format!(
                "{:<id_width$}  {:<name_width$}  {}",
                truncate(app.id.as_str(), id_width),
                truncate(display_name(app), name_width),
                views_label(app.views()),
            )
        })
        .collect()
}

pub fn views_label(views: u64) -> String {
    match views {
        1 => "1 view".to_owned(),
        n => format!("{n} views"),
    }
}

fn display_name(app: &Application) -> &str {
    app.name.as_deref().unwrap_or("-")
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, max: usize) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0).min(max)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
