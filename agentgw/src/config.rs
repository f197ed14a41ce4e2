//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `AGENTGW_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `AGENTGW_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `AGENTGW_AGENT__AGENT_ID=ABCDEF1234` sets the `agent.agent_id` field.
//!
//! ## Required Values
//!
//! The agent identifier, agent alias identifier, and upload bucket have no usable defaults.
//! [`Config::load`] rejects a configuration that leaves any of them empty, so a misconfigured
//! deployment fails at startup rather than on the first request.
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! AGENTGW_PORT=8080
//! AGENTGW_AGENT__AGENT_ID="ABCDEF1234"
//! AGENTGW_AGENT__ALIAS_ID="TSTALIASID"
//! AGENTGW_UPLOAD__BUCKET="my-upload-bucket"
//! AGENTGW_IDENTITY__FORCE_DEMO_IDENTITY=false
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "AGENTGW_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have defaults except the agent and bucket identifiers, which must be
/// supplied per deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// AWS region used for both the storage and agent runtime clients
    pub region: String,
    /// Agent runtime configuration (Bedrock agent and alias identifiers)
    pub agent: AgentConfig,
    /// Upload grant configuration (bucket and key namespace)
    pub upload: UploadConfig,
    /// Acting-identity policy for outbound agent invocations
    pub identity: IdentityConfig,
    /// Maximum accepted JSON request body size in bytes
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            region: "ap-southeast-2".to_string(),
            agent: AgentConfig::default(),
            upload: UploadConfig::default(),
            identity: IdentityConfig::default(),
            body_limit: 2 * 1024 * 1024,
        }
    }
}

/// Target agent runtime identifiers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Bedrock agent identifier (required)
    pub agent_id: String,
    /// Bedrock agent alias identifier (required)
    pub alias_id: String,
    /// Session identifier used when the client does not supply one.
    ///
    /// All anonymous callers share this session, which is how multi-turn
    /// context continuity is achieved server-side. The agent runtime owns
    /// the session state, not this service.
    pub fallback_session_id: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: String::new(),
            alias_id: String::new(),
            fallback_session_id: "demo-session".to_string(),
        }
    }
}

/// Upload grant configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Storage bucket that receives uploads (required)
    pub bucket: String,
    /// Namespace prepended to every generated object key
    pub key_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            key_prefix: "chat_uploads/".to_string(),
        }
    }
}

/// Acting-identity policy.
///
/// When `force_demo_identity` is enabled (the default), every agent invocation
/// carries the configured demo identity as its acting identity, regardless of
/// the client-supplied user identifier. The real identifier is then only
/// attached as a non-authoritative display label.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Demo identity string, also the fallback user segment for upload keys
    pub demo_user: String,
    /// Pin the acting identity of agent invocations to `demo_user`
    pub force_demo_identity: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            demo_user: "demo".to_string(),
            force_demo_identity: true,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.agent.agent_id.is_empty() {
            return Err(Error::Configuration {
                message: "Config validation: agent.agent_id is not set. \
                     Please set AGENTGW_AGENT__AGENT_ID or add agent.agent_id to the config file."
                    .to_string(),
            });
        }

        if self.agent.alias_id.is_empty() {
            return Err(Error::Configuration {
                message: "Config validation: agent.alias_id is not set. \
                     Please set AGENTGW_AGENT__ALIAS_ID or add agent.alias_id to the config file."
                    .to_string(),
            });
        }

        if self.upload.bucket.is_empty() {
            return Err(Error::Configuration {
                message: "Config validation: upload.bucket is not set. \
                     Please set AGENTGW_UPLOAD__BUCKET or add upload.bucket to the config file."
                    .to_string(),
            });
        }

        if self.upload.key_prefix.contains("..") {
            return Err(Error::Configuration {
                message: "Config validation: upload.key_prefix must not contain '..'".to_string(),
            });
        }

        if self.identity.demo_user.is_empty() {
            return Err(Error::Configuration {
                message: "Config validation: identity.demo_user cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("AGENTGW_").split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn test_args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_load_from_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 8080
agent:
  agent_id: "ABCDEF1234"
  alias_id: "TSTALIASID"
upload:
  bucket: "demo-uploads"
"#,
            )?;

            let config = Config::load(&test_args("test.yaml")).expect("config should load");

            assert_eq!(config.port, 8080);
            assert_eq!(config.agent.agent_id, "ABCDEF1234");
            assert_eq!(config.agent.alias_id, "TSTALIASID");
            assert_eq!(config.upload.bucket, "demo-uploads");
            // Untouched fields keep their defaults
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.region, "ap-southeast-2");
            assert_eq!(config.upload.key_prefix, "chat_uploads/");
            assert_eq!(config.agent.fallback_session_id, "demo-session");
            assert!(config.identity.force_demo_identity);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 8080
agent:
  agent_id: "FROMYAML00"
  alias_id: "TSTALIASID"
upload:
  bucket: "demo-uploads"
"#,
            )?;
            jail.set_env("AGENTGW_PORT", "9090");
            jail.set_env("AGENTGW_AGENT__AGENT_ID", "FROMENV000");
            jail.set_env("AGENTGW_IDENTITY__FORCE_DEMO_IDENTITY", "false");

            let config = Config::load(&test_args("test.yaml")).expect("config should load");

            assert_eq!(config.port, 9090);
            assert_eq!(config.agent.agent_id, "FROMENV000");
            assert!(!config.identity.force_demo_identity);
            Ok(())
        });
    }

    #[test]
    fn test_missing_agent_id_is_rejected_at_load() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
agent:
  alias_id: "TSTALIASID"
upload:
  bucket: "demo-uploads"
"#,
            )?;

            let result = Config::load(&test_args("test.yaml"));
            assert!(result.is_err(), "empty agent_id should fail validation");
            let message = result.unwrap_err().to_string();
            assert!(message.contains("agent.agent_id"), "unexpected error: {message}");
            Ok(())
        });
    }

    #[test]
    fn test_missing_bucket_is_rejected_at_load() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
agent:
  agent_id: "ABCDEF1234"
  alias_id: "TSTALIASID"
"#,
            )?;

            let result = Config::load(&test_args("test.yaml"));
            assert!(result.is_err(), "empty bucket should fail validation");
            assert!(result.unwrap_err().to_string().contains("upload.bucket"));
            Ok(())
        });
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:4000");
    }
}
