use std::env;

/// Default form-relay endpoint (Web3Forms)
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Default session cookie set by the identity provider's sign-in flow
pub const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Environment configuration
    pub environment: Environment,

    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Identity provider (Supabase-compatible auth API)
    pub supabase_url: String,
    pub supabase_anon_key: String,

    // Form relay; an unset key degrades to an empty credential
    pub relay_endpoint: String,
    pub relay_access_key: String,

    // Session cookie
    pub session_cookie: String,
    // None = host-only cookie, Some = domain cookie
    pub cookie_domain: Option<String>,

    // Optional link shown on the landing page
    pub sign_in_url: Option<String>,

    // HTTP client timeout configuration (in seconds)
    pub http_connect_timeout_secs: u64,
    pub http_request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        };

        // Required variables
        let supabase_url = lookup("SUPABASE_URL")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_URL environment variable is required"))?;
        url::Url::parse(&supabase_url)
            .map_err(|e| anyhow::anyhow!("SUPABASE_URL is not a valid URL: {}", e))?;
        let supabase_url = supabase_url.trim_end_matches('/').to_string();

        let supabase_anon_key = lookup("SUPABASE_ANON_KEY")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_ANON_KEY environment variable is required"))?;

        // Optional variables with defaults
        let relay_endpoint = lookup("WEB3FORMS_ENDPOINT")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RELAY_ENDPOINT.to_string());
        url::Url::parse(&relay_endpoint)
            .map_err(|e| anyhow::anyhow!("WEB3FORMS_ENDPOINT is not a valid URL: {}", e))?;

        let relay_access_key = lookup("WEB3FORMS_ACCESS_KEY").unwrap_or_default();

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let server_port = lookup("SERVER_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let session_cookie = lookup("SESSION_COOKIE")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());

        let cookie_domain = lookup("COOKIE_DOMAIN").filter(|s| !s.is_empty());

        let sign_in_url = lookup("SIGN_IN_URL").filter(|s| !s.is_empty());

        let http_connect_timeout_secs = lookup("HTTP_CONNECT_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        let http_request_timeout_secs = lookup("HTTP_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Config {
            environment,
            server_host,
            server_port,
            supabase_url,
            supabase_anon_key,
            relay_endpoint,
            relay_access_key,
            session_cookie,
            cookie_domain,
            sign_in_url,
            http_connect_timeout_secs,
            http_request_timeout_secs,
        })
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Whether a relay access key was configured
    pub fn has_relay_key(&self) -> bool {
        !self.relay_access_key.is_empty()
    }

    /// Get cookie security flags based on environment
    pub fn cookie_secure_flag(&self) -> &str {
        if self.is_production() {
            "; Secure"
        } else {
            ""
        }
    }

    /// Get cookie domain attribute string (empty if host-only cookie)
    pub fn cookie_domain_attr(&self) -> String {
        match &self.cookie_domain {
            Some(domain) => format!("; Domain={}", domain),
            None => String::new(),
        }
    }

    /// Get bind address for server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("SUPABASE_URL", "https://project.supabase.co/"),
        ("SUPABASE_ANON_KEY", "anon"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.relay_endpoint, DEFAULT_RELAY_ENDPOINT);
        assert_eq!(config.session_cookie, DEFAULT_SESSION_COOKIE);
        assert_eq!(config.cookie_domain_attr(), "");
        assert_eq!(config.cookie_secure_flag(), "");
        assert!(config.sign_in_url.is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed_from_supabase_url() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.supabase_url, "https://project.supabase.co");
    }

    #[test]
    fn test_missing_relay_key_is_empty_not_error() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.relay_access_key, "");
        assert!(!config.has_relay_key());
    }

    #[test]
    fn test_missing_supabase_url_fails() {
        let err = load(&[("SUPABASE_ANON_KEY", "anon")]).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn test_invalid_supabase_url_fails() {
        let err = load(&[("SUPABASE_URL", "not a url"), ("SUPABASE_ANON_KEY", "anon")])
            .unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));
    }

    #[test]
    fn test_production_cookie_flags() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ENVIRONMENT", "prod"));
        vars.push(("COOKIE_DOMAIN", "example.com"));
        vars.push(("WEB3FORMS_ACCESS_KEY", "key-123"));
        let config = load(&vars).unwrap();
        assert!(config.is_production());
        assert_eq!(config.cookie_secure_flag(), "; Secure");
        assert_eq!(config.cookie_domain_attr(), "; Domain=example.com");
        assert!(config.has_relay_key());
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SERVER_PORT", "http"));
        let config = load(&vars).unwrap();
        assert_eq!(config.server_port, 3000);
    }
}
