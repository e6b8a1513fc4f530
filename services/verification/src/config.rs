use serde::Deserialize;

use chow_core::config::Config;

/// Verification service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3120). Env var: `VERIFICATION_PORT`.
    #[serde(default = "default_port")]
    pub verification_port: u16,
    /// Resend API key used to deliver verification emails.
    pub resend_api_key: String,
    #[serde(default = "default_resend_api_url")]
    pub resend_api_url: String,
    /// `From` header of verification emails.
    #[serde(default = "default_email_from")]
    pub email_from: String,
    /// Supabase project URL (e.g. "https://abc.supabase.co").
    pub supabase_url: String,
    /// Service-role key for the Supabase auth admin API.
    pub supabase_service_role_key: String,
    pub google_places_api_key: String,
    #[serde(default = "default_google_places_api_url")]
    pub google_places_api_url: String,
    /// Base URL for generated placeholder avatars.
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,
    /// Per-request timeout for outbound HTTP calls, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Config for VerificationConfig {}

fn default_port() -> u16 {
    3120
}

fn default_resend_api_url() -> String {
    "https://api.resend.com".to_owned()
}

fn default_email_from() -> String {
    "ChowLocal <noreply@resend.dev>".to_owned()
}

fn default_google_places_api_url() -> String {
    "https://maps.googleapis.com".to_owned()
}

fn default_avatar_base_url() -> String {
    "https://avatar-placeholder.iran.liara.run".to_owned()
}

fn default_http_timeout_secs() -> u64 {
    10
}
