use anyhow::{Context, Result};
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// How credential values in the config are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    #[default]
    Plain,
    Base64,
}

impl SecretEncoding {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "base64" => Ok(Self::Base64),
            other => anyhow::bail!("Unknown secret encoding '{other}' (expected plain or base64)"),
        }
    }

    pub fn resolver(self) -> Box<dyn SecretResolver> {
        match self {
            Self::Plain => Box::new(PlainResolver),
            Self::Base64 => Box::new(Base64Resolver),
        }
    }
}

/// Turns a stored credential into its plaintext before any client is built.
pub trait SecretResolver {
    fn resolve(&self, value: &SecretString) -> Result<SecretString>;
}

pub struct PlainResolver;

impl SecretResolver for PlainResolver {
    fn resolve(&self, value: &SecretString) -> Result<SecretString> {
        Ok(SecretString::from(value.expose_secret()))
    }
}

pub struct Base64Resolver;

impl SecretResolver for Base64Resolver {
    fn resolve(&self, value: &SecretString) -> Result<SecretString> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(value.expose_secret().trim())
            .context("Secret is not valid base64")?;
        let plain = String::from_utf8(bytes).context("Decoded secret is not valid UTF-8")?;
        Ok(SecretString::from(plain))
    }
}
