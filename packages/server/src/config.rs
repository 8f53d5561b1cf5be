//! Server configuration.
//!
//! Every option can be given on the command line or through a `TSUDOI_*`
//! environment variable.

use clap::Parser;

/// Secret used when none is configured. Only suitable for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "tsudoi-development-secret";

/// Command line arguments of `tsudoi-server`
#[derive(Debug, Clone, Parser)]
#[command(name = "tsudoi-server", version, about = "Room chat server with live WebSocket broadcast")]
pub struct ServerArgs {
    /// Host to bind to
    #[arg(long, env = "TSUDOI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "TSUDOI_PORT", default_value_t = 8000)]
    pub port: u16,

    /// HMAC secret for access tokens
    #[arg(long, env = "TSUDOI_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Access token lifetime in minutes
    #[arg(long, env = "TSUDOI_TOKEN_TTL_MINUTES", default_value_t = 30)]
    pub token_ttl_minutes: i64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "TSUDOI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl ServerConfig {
    /// `host:port` to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl_minutes: 30,
        }
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            jwt_secret: args
                .jwt_secret
                .unwrap_or_else(|| DEVELOPMENT_JWT_SECRET.to_string()),
            token_ttl_minutes: args.token_ttl_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        // テスト項目: 引数なしではデフォルト値が使われる
        // when (操作):
        let args = ServerArgs::try_parse_from(["tsudoi-server"]).unwrap();
        let config = ServerConfig::from(args);

        // then (期待する結果):
        assert_eq!(config.port, 8000);
        assert_eq!(config.token_ttl_minutes, 30);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_args_override() {
        // テスト項目: コマンドライン引数で上書きできる
        let args = ServerArgs::try_parse_from([
            "tsudoi-server",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--jwt-secret",
            "s3cret",
            "--token-ttl-minutes",
            "5",
        ])
        .unwrap();
        let config = ServerConfig::from(args);

        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_ttl_minutes, 5);
        assert!(!config.uses_development_secret());
    }
}
