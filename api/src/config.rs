use std::net::SocketAddr;

#[derive(Clone)]
pub enum Env {
    Dev,
    Staging,
    Production,
}

pub struct ServerConfig {
    pub env: Env,
    pub bind_addr: SocketAddr,
    pub database_url: String,
}

fn var(key: &str) -> Result<Option<String>, String> {
    match std::env::var(key) {
        Ok(env) => Ok(Some(env)),
        Err(e) => match e {
            std::env::VarError::NotPresent => Ok(None),
            std::env::VarError::NotUnicode(_) => Err(format!(
                "Could not get the environment variable `{key}` due to unicode error"
            )),
        },
    }
}

fn required_var(key: &str) -> String {
    let val = var(key);
    match val {
        Ok(val) => match val {
            Some(val) => val,
            None => {
                tracing::error!("Environment variable `{key}` is required");
                std::process::exit(1)
            }
        },
        Err(e) => {
            tracing::error!(
                "Environment variable `{key}` is required, but could not retrieve: {e}"
            );
            std::process::exit(1)
        }
    }
}

impl ServerConfig {
    pub fn new_from_env() -> Self {
        let bind_addr = match var("BIND_ADDR") {
            Ok(Some(addr)) => match addr.parse() {
                Ok(addr) => addr,
                Err(e) => {
                    tracing::error!("Could not parse `BIND_ADDR` ({addr}): {e}");
                    std::process::exit(1)
                }
            },
            _ => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        ServerConfig {
            env: match var("ENVIRONMENT") {
                Ok(Some(env)) => match env.as_str() {
                    "dev" => Env::Dev,
                    "staging" => Env::Staging,
                    "production" => Env::Production,
                    _ => Env::Dev,
                },
                _ => Env::Dev,
            },
            bind_addr,
            database_url: required_var("DATABASE_URL"),
        }
    }
}
