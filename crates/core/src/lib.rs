pub mod domain;
pub mod ingest;
pub mod time;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub csv_path: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                csv_path: std::env::var("CSV_PATH").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_csv_path(&self) -> anyhow::Result<&str> {
            self.csv_path.as_deref().context("CSV_PATH is required")
        }
    }
}
