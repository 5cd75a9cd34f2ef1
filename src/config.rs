use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub primary_rpc: String,
    pub secondary_rpc: Option<String>,
    pub ops_per_page: u64,
    pub date_format: String,
    pub bind_address: String,
    pub currency_symbol: String,
    pub avatar_cdn: String,
    pub avatar_fallback: String,
    pub rpc_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_rpc: "https://api.golos.id".to_string(),
            secondary_rpc: None,
            ops_per_page: 100,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            bind_address: "127.0.0.1:5000".to_string(),
            currency_symbol: "GOLOS".to_string(),
            avatar_cdn: "https://imgp.golos.io/0x0/".to_string(),
            avatar_fallback: "https://api.adorable.io/avatars/200/{}.png".to_string(),
            rpc_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let ops_per_page = parse_var("OPS_PER_PAGE", defaults.ops_per_page)?;
        if ops_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                name: "OPS_PER_PAGE",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            primary_rpc: env::var("PRIMARY_RPC").unwrap_or(defaults.primary_rpc),
            secondary_rpc: env::var("SECONDARY_RPC").ok().filter(|url| !url.is_empty()),
            ops_per_page,
            date_format: env::var("DATE_FORMAT").unwrap_or(defaults.date_format),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            avatar_cdn: env::var("AVATAR_CDN").unwrap_or(defaults.avatar_cdn),
            avatar_fallback: env::var("AVATAR_FALLBACK").unwrap_or(defaults.avatar_fallback),
            rpc_timeout_secs: parse_var("RPC_TIMEOUT_SECS", defaults.rpc_timeout_secs)?,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
