use rusqlite_migration::{Migrations, M};

pub fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE stores (
            store           TEXT PRIMARY KEY,
            last_synced_at  TEXT
        );

        CREATE TABLE applications (
            id                  TEXT PRIMARY KEY,
            name                TEXT,
            summary             TEXT,
            description         TEXT,
            developer           TEXT,
            license             TEXT,
            homepage            TEXT,
            bugtracker_url      TEXT,
            donation_url        TEXT,
            icon                TEXT,
            download_url        TEXT,
            version             TEXT,
            last_release_date   TEXT,
            creation_date       TEXT,
            tags_json           TEXT NOT NULL DEFAULT '[]',
            screenshots_json    TEXT NOT NULL DEFAULT '[]',
            store               TEXT NOT NULL,
            package_type        TEXT NOT NULL,
            view_count          INTEGER
        );

        CREATE INDEX idx_applications_store ON applications(store);
        CREATE INDEX idx_applications_name ON applications(name);",
    )])
}
