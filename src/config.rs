use std::time::Duration;

use validator::{Validate, ValidationError};

#[derive(Deserialize, Debug, Validate)]
#[validate(schema(function = "validate_pool_bounds"))]
pub struct Config {
    database_url: String,
    api_host: Option<String>,
    api_port: Option<u16>,
    /// set by most hosting platforms, takes precedence over `api_port`
    port: Option<u16>,
    static_dir: Option<String>,
    #[serde(default = "default_max_connections")]
    #[validate(range(min = 1))]
    db_max_connections: u32,
    /// amount of connections the pool keeps open while idle
    #[serde(default = "default_min_connections")]
    db_min_connections: u32,
    /// lifetime of a single connection in seconds
    #[serde(default = "default_max_lifetime")]
    #[validate(range(min = 1))]
    db_max_lifetime: u64,
    /// log every step of a booking submission
    #[serde(default)]
    verbose_bookings: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    2
}

fn default_max_lifetime() -> u64 {
    60 * 30
}

fn validate_pool_bounds(config: &Config) -> Result<(), ValidationError> {
    if config.db_min_connections > config.db_max_connections {
        let mut error = ValidationError::new("pool_bounds");
        error.message = Some("db_min_connections can't exceed db_max_connections".into());
        return Err(error);
    }
    Ok(())
}

lazy_static! {
    static ref CONFIG: Config = match Config::from_iter(std::env::vars()) {
        Ok(config) => config,
        Err(error) => panic!("{}", error),
    };
}

impl Config {
    /// Parse and validate a configuration from key/value pairs,
    /// keys are matched case insensitive against the field names
    pub fn from_iter<I>(vars: I) -> Result<Config, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| format!("Missing or incorrect environment variable: {}", e))?;

        config
            .validate()
            .map_err(|e| format!("invalid environment variable: {}", e))?;

        Ok(config)
    }

    /// Force the configuration to be loaded, panics when it's invalid
    pub fn init() {
        lazy_static::initialize(&CONFIG);
    }

    pub fn database_url() -> &'static str {
        CONFIG.database_url.as_ref()
    }

    pub fn api_host() -> &'static str {
        CONFIG.host()
    }

    pub fn api_port() -> u16 {
        CONFIG.bind_port()
    }

    pub fn static_dir() -> &'static str {
        match &CONFIG.static_dir {
            Some(dir) => dir.as_ref(),
            None => "static",
        }
    }

    pub fn db_max_connections() -> u32 {
        CONFIG.db_max_connections
    }

    pub fn db_min_connections() -> u32 {
        CONFIG.db_min_connections
    }

    pub fn db_max_lifetime() -> Duration {
        Duration::from_secs(CONFIG.db_max_lifetime)
    }

    pub fn verbose_bookings() -> bool {
        CONFIG.verbose_bookings
    }

    fn host(&self) -> &str {
        match &self.api_host {
            Some(host) => host.as_ref(),
            None => "localhost",
        }
    }

    fn bind_port(&self) -> u16 {
        self.port.or(self.api_port).unwrap_or(8080)
    }
}
