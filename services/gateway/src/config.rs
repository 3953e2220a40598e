/// Gateway configuration loaded from environment variables.
#[derive(Debug)]
pub struct GatewayConfig {
    /// Hosted identity provider project URL.
    pub provider_url: String,
    /// Public (anonymous) API key for user-scoped provider calls.
    pub provider_anon_key: String,
    /// Privileged service-role key. Server-only; bypasses row-level
    /// authorization on administrative calls.
    pub provider_service_role_key: String,
    /// HMAC secret the provider signs access tokens with.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Public site URL used to build email-confirmation redirect targets.
    pub site_url: String,
    /// Profiles service base URL.
    pub profiles_url: String,
    /// Shared key for the profiles service internal surface.
    pub profiles_service_key: String,
    /// TCP port to listen on (default 3100). Env var: `GATEWAY_PORT`.
    pub gateway_port: u16,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            provider_url: std::env::var("PROVIDER_URL").expect("PROVIDER_URL"),
            provider_anon_key: std::env::var("PROVIDER_ANON_KEY").expect("PROVIDER_ANON_KEY"),
            provider_service_role_key: std::env::var("PROVIDER_SERVICE_ROLE_KEY")
                .expect("PROVIDER_SERVICE_ROLE_KEY"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            site_url: std::env::var("SITE_URL").expect("SITE_URL"),
            profiles_url: std::env::var("PROFILES_URL").expect("PROFILES_URL"),
            profiles_service_key: std::env::var("PROFILES_SERVICE_KEY")
                .expect("PROFILES_SERVICE_KEY"),
            gateway_port: std::env::var("GATEWAY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
        }
    }
}
