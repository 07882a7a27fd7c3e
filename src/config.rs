use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Dev,
    Test,
    Prod,
}

/// Runtime settings, read from `TRIVIA_*` environment variables (and `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub profile: Profile,
    pub database_url: String,
    pub database_test_url: Option<String>,
    pub listen_addr: String,
    pub run_migrations: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_environment(Environment::with_prefix("TRIVIA"))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("profile", "dev")?
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("listen_addr", "0.0.0.0:8080")?
            .set_default("run_migrations", true)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// The test profile talks to its own database when one is configured.
    pub fn database_url(&self) -> &str {
        match (self.profile, &self.database_test_url) {
            (Profile::Test, Some(url)) => url,
            _ => &self.database_url,
        }
    }
}
