use anyhow::{ensure, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            request_timeout_secs: 30,
            enable_cors: false,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write error events to `directory/file_name`
    pub error_file: bool,
    pub directory: String,
    pub file_name: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            error_file: true,
            directory: "logs".to_string(),
            file_name: "app.log".to_string(),
            json: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Headroom added per redistribution pass (MW)
    pub balancer_step_mw: f64,
    pub tolerance_mw: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            balancer_step_mw: 10.0,
            tolerance_mw: 1e-6,
        }
    }
}

impl PlannerConfig {
    /// Smallest balancer step accepted from configuration
    pub const MIN_BALANCER_STEP_MW: f64 = 0.1;

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.balancer_step_mw.is_finite() && self.balancer_step_mw >= Self::MIN_BALANCER_STEP_MW,
            "planner.balancer_step_mw must be a finite value >= {} MW, got {}",
            Self::MIN_BALANCER_STEP_MW,
            self.balancer_step_mw
        );
        ensure!(
            self.tolerance_mw.is_finite() && self.tolerance_mw >= 0.0,
            "planner.tolerance_mw must be a finite non-negative value, got {}",
            self.tolerance_mw
        );
        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("PLANNER__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Self = figment.extract()?;
        cfg.planner.validate()?;
        Ok(cfg)
    }
}
