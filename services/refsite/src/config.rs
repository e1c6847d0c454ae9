use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: Option<PathBuf>,
    pub cors_permissive: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("REFSITE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("REFSITE_BIND_ADDR is not a socket address: {bind_addr}"))?;

        let data_dir = std::env::var("REFSITE_DATA_DIR").ok().filter(|v| !v.is_empty()).map(PathBuf::from);

        let cors_permissive = match std::env::var("REFSITE_CORS_PERMISSIVE") {
            Ok(v) => parse_flag("REFSITE_CORS_PERMISSIVE", &v)?,
            Err(_) => true,
        };

        if let Some(dir) = &data_dir {
            if !dir.is_dir() {
                bail!("REFSITE_DATA_DIR does not exist or is not a directory: {}", dir.display());
            }
        }

        Ok(Self { bind_addr, data_dir, cors_permissive })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        other => bail!("{key} must be a boolean, got {other:?}"),
    }
}
