//! Payments Config

use clap::Args;

/// Payment provider settings.
#[derive(Debug, Args)]
pub struct PaymentsProviderConfig {
    /// Payment provider API base URL
    #[arg(
        long,
        env = "PAYMENTS_BASE_URL",
        default_value = "https://api.stripe.com"
    )]
    pub base_url: String,

    /// Payment provider secret API key
    #[arg(long, env = "PAYMENTS_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}
