use crate::auth::sign::validate_credentials;
use crate::auth::{Credentials, Protocol, SignError};
use std::env;
use std::net::SocketAddr;

/// Upper bound for either segment lifetime (7 days).
pub const MAX_TTL_SECS: i64 = 604_800;

/// `Debug` is safe to log: `Credentials` redacts both secret keys.
#[derive(Clone, Debug)]
pub struct Config {
    // Duo integration
    pub credentials: Credentials,
    pub host: String,

    // Server
    pub bind_addr: SocketAddr,
    pub response_path: String,

    // Segment lifetimes (in seconds)
    pub duo_expire_secs: i64,
    pub app_expire_secs: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine, variables may be set directly
        let _ = dotenvy::dotenv();

        let defaults = Protocol::default();

        let credentials = Credentials::new(
            required_var("DUO_IKEY")?,
            required_var("DUO_SKEY")?,
            required_var("DUO_AKEY")?,
        );
        validate_credentials(&defaults, &credentials).map_err(|e| {
            let key = match e {
                SignError::InvalidIntegrationKey => "DUO_IKEY",
                SignError::InvalidServerKey => "DUO_SKEY",
                _ => "DUO_AKEY",
            };
            ConfigError::InvalidValue(key.to_string(), e.to_string())
        })?;

        let host = required_var("DUO_HOST")?;
        if host.contains('"') || host.contains('<') || host.contains('>') {
            return Err(ConfigError::InvalidValue(
                "DUO_HOST".to_string(),
                "must be a bare host name".to_string(),
            ));
        }

        // Server
        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let response_path = env::var("RESPONSE_PATH").unwrap_or_else(|_| "/response".to_string());
        if !response_path.starts_with('/') || response_path == "/" {
            return Err(ConfigError::InvalidValue(
                "RESPONSE_PATH".to_string(),
                "must start with '/' and not be the root path".to_string(),
            ));
        }

        // TTLs
        let duo_expire_secs = parse_env_or_default("DUO_TX_TTL_SECS", defaults.duo_expire_secs)?;
        let app_expire_secs = parse_env_or_default("APP_TTL_SECS", defaults.app_expire_secs)?;
        for (key, value) in [
            ("DUO_TX_TTL_SECS", duo_expire_secs),
            ("APP_TTL_SECS", app_expire_secs),
        ] {
            if value <= 0 || value > MAX_TTL_SECS {
                return Err(ConfigError::InvalidValue(
                    key.to_string(),
                    format!("must be between 1 and {}", MAX_TTL_SECS),
                ));
            }
        }

        Ok(Config {
            credentials,
            host,
            bind_addr,
            response_path,
            duo_expire_secs,
            app_expire_secs,
        })
    }

    /// Protocol settings with the configured segment lifetimes.
    pub fn protocol(&self) -> Protocol {
        Protocol {
            duo_expire_secs: self.duo_expire_secs,
            app_expire_secs: self.app_expire_secs,
            ..Protocol::default()
        }
    }
}

fn required_var(key: &str) -> Result<String, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests modify global env vars, so run them serially.
    // unwrap_or_else handles poison from prior panics.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn lock_test() -> std::sync::MutexGuard<'static, ()> {
        TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    const TEST_IKEY: &str = "DIXXXXXXXXXXXXXXXXXX";
    const TEST_SKEY: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
    const TEST_AKEY: &str = "useacustomerprovidedapplicationsecretkey";
    const TEST_HOST: &str = "api-xxxxxxxx.duosecurity.com";

    fn clear_test_env() {
        env::remove_var("DUO_IKEY");
        env::remove_var("DUO_SKEY");
        env::remove_var("DUO_AKEY");
        env::remove_var("DUO_HOST");
        env::remove_var("BIND_ADDR");
        env::remove_var("RESPONSE_PATH");
        env::remove_var("DUO_TX_TTL_SECS");
        env::remove_var("APP_TTL_SECS");
    }

    fn set_required_env() {
        env::set_var("DUO_IKEY", TEST_IKEY);
        env::set_var("DUO_SKEY", TEST_SKEY);
        env::set_var("DUO_AKEY", TEST_AKEY);
        env::set_var("DUO_HOST", TEST_HOST);
    }

    #[test]
    fn test_parse_env_or_default() {
        let _guard = lock_test();

        env::set_var("TEST_I64", "12345");
        let result: Result<i64, ConfigError> = parse_env_or_default("TEST_I64", 100);
        assert_eq!(result.unwrap(), 12345);

        env::set_var("TEST_I64", "twelve");
        let result: Result<i64, ConfigError> = parse_env_or_default("TEST_I64", 100);
        assert!(matches!(result, Err(ConfigError::ParseError(_, _))));

        env::remove_var("TEST_I64");
        let result: Result<i64, ConfigError> = parse_env_or_default("TEST_I64", 100);
        assert_eq!(result.unwrap(), 100);
    }

    #[test]
    fn test_config_defaults() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        // Override anything a local .env might set
        env::set_var("BIND_ADDR", "127.0.0.1:8080");
        env::set_var("RESPONSE_PATH", "/response");
        env::set_var("DUO_TX_TTL_SECS", "300");
        env::set_var("APP_TTL_SECS", "3600");

        let config = Config::from_env().unwrap();

        assert_eq!(config.credentials.ikey, TEST_IKEY);
        assert_eq!(config.credentials.skey, TEST_SKEY);
        assert_eq!(config.credentials.akey, TEST_AKEY);
        assert_eq!(config.host, TEST_HOST);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.response_path, "/response");
        assert_eq!(config.protocol(), Protocol::default());

        clear_test_env();
    }

    #[test]
    fn test_custom_ttls() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        env::set_var("DUO_TX_TTL_SECS", "60");
        env::set_var("APP_TTL_SECS", "600");

        let config = Config::from_env().unwrap();
        let protocol = config.protocol();
        assert_eq!(protocol.duo_expire_secs, 60);
        assert_eq!(protocol.app_expire_secs, 600);
        assert_eq!(protocol.auth_prefix, "AUTH");

        clear_test_env();
    }

    #[test]
    fn test_non_positive_ttl() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        env::set_var("DUO_TX_TTL_SECS", "0");

        let result = Config::from_env();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue(ref s, _) if s == "DUO_TX_TTL_SECS"
        ));

        clear_test_env();
    }

    #[test]
    fn test_ttl_upper_bound() {
        let _guard = lock_test();

        for value in ["604801", "9223372036854775807"] {
            clear_test_env();
            set_required_env();
            env::set_var("APP_TTL_SECS", value);

            let result = Config::from_env();
            assert!(
                matches!(result, Err(ConfigError::InvalidValue(ref s, _)) if s == "APP_TTL_SECS"),
                "APP_TTL_SECS = {} should be rejected",
                value
            );
        }

        clear_test_env();
        set_required_env();
        env::set_var("APP_TTL_SECS", MAX_TTL_SECS.to_string());
        let config = Config::from_env().unwrap();
        let signed = crate::auth::sign(&config.protocol(), &config.credentials, "testuser");
        assert!(signed.is_ok());

        clear_test_env();
    }

    #[test]
    fn test_empty_ikey() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        // Empty rather than unset, so dotenvy cannot refill it from .env
        env::set_var("DUO_IKEY", "");

        let result = Config::from_env();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue(ref s, _) if s == "DUO_IKEY"
        ));

        clear_test_env();
    }

    #[test]
    fn test_invalid_key_lengths() {
        let _guard = lock_test();

        for (key, value) in [
            ("DUO_IKEY", "DIXXXXXXXXXXXXXXXXX"),
            ("DUO_SKEY", "deadbeef"),
            ("DUO_AKEY", "tooshort"),
        ] {
            clear_test_env();
            set_required_env();
            env::set_var(key, value);

            let result = Config::from_env();
            assert!(
                matches!(result, Err(ConfigError::InvalidValue(ref s, ref msg))
                    if s == key && msg.contains("sign()")),
                "{} = {} should be rejected",
                key,
                value
            );
        }

        clear_test_env();
    }

    #[test]
    fn test_invalid_host() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        env::set_var("DUO_HOST", "\"><script>");

        let result = Config::from_env();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue(ref s, _) if s == "DUO_HOST"
        ));

        clear_test_env();
    }

    #[test]
    fn test_invalid_socket_addr() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        env::set_var("BIND_ADDR", "invalid_address");

        let result = Config::from_env();
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_, _)));

        clear_test_env();
    }

    #[test]
    fn test_invalid_response_path() {
        let _guard = lock_test();
        clear_test_env();
        set_required_env();
        env::set_var("RESPONSE_PATH", "response");

        let result = Config::from_env();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue(ref s, _) if s == "RESPONSE_PATH"
        ));

        clear_test_env();
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config {
            credentials: Credentials::new(TEST_IKEY, TEST_SKEY, TEST_AKEY),
            host: TEST_HOST.to_string(),
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            response_path: "/response".to_string(),
            duo_expire_secs: 300,
            app_expire_secs: 3600,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains(TEST_SKEY));
        assert!(!debug.contains(TEST_AKEY));
        assert!(debug.contains(TEST_HOST));
    }
}
