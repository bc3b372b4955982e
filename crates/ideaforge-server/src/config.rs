use std::net::{IpAddr, SocketAddr};

use clap::Parser;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 8000;

#[derive(Debug, Clone, Parser)]
#[command(name = "ideaforge-server", about = "Project idea generation gateway")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "IDEAFORGE_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "IDEAFORGE_PORT", default_value = "3720")]
    pub port: u16,

    /// Chat-completions endpoint of the model provider
    #[arg(long, env = "IDEAFORGE_COMPLETION_URL", default_value = DEFAULT_COMPLETION_URL)]
    pub completion_url: String,

    /// Bearer key for the model provider
    #[arg(long, env = "IDEAFORGE_PROVIDER_API_KEY", hide_env_values = true)]
    pub provider_api_key: String,

    /// Provider name used in upstream error messages
    #[arg(long, env = "IDEAFORGE_PROVIDER_NAME", default_value = "OpenAI")]
    pub provider_name: String,

    /// Model identifier sent with every completion request
    #[arg(long, env = "IDEAFORGE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Output token budget per completion
    #[arg(long, env = "IDEAFORGE_MAX_COMPLETION_TOKENS", default_value_t = DEFAULT_MAX_COMPLETION_TOKENS)]
    pub max_completion_tokens: u32,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config =
            ServerConfig::try_parse_from(["ideaforge-server", "--provider-api-key", "sk-test"])
                .unwrap();
        assert_eq!(config.provider_api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_completion_tokens, DEFAULT_MAX_COMPLETION_TOKENS);
        assert_eq!(config.addr().port(), 3720);
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "ideaforge-server",
            "--provider-api-key",
            "k",
            "--bind",
            "127.0.0.1",
            "--port",
            "9000",
            "--model",
            "other-model",
            "--max-completion-tokens",
            "1024",
            "--provider-name",
            "Gateway",
        ])
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.model, "other-model");
        assert_eq!(config.max_completion_tokens, 1024);
        assert_eq!(config.provider_name, "Gateway");
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "ideaforge-server",
            "--provider-api-key",
            "k",
            "--bind",
            "not-an-ip",
        ]);
        assert!(result.is_err());
    }
}
