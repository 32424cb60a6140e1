#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the marketplace backend, e.g. `"https://shop.example.com"`.
    pub api_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Bearer token to seed the session with, if one was provided.
    pub api_token: Option<String>,
    /// Route the front end is sent to after a 401.
    pub login_route: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("login_route", &self.login_route)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .finish()
    }
}
