//! Top-level configuration: registrars, DNS providers and domains.

use std::{fs, io};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{domain::DomainConfig, error::ModelError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing configuration: {0}")]
    Json(#[from] serde_json::Error),
}

macro_rules! impl_integration {
    (
    $(#[$outer:meta])*
    pub struct $name:ident
   ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub name: String,

            /// Integration type, such as `BIND` or `ROUTE53`.
            #[serde(rename = "type")]
            pub kind: String,

            /// Integration-specific settings, passed through untouched.
            #[serde(default, rename = "meta", skip_serializing_if = "Option::is_none")]
            pub metadata: Option<Value>,
        }

        impl $name {
            pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    kind: kind.into(),
                    metadata: None,
                }
            }

            /// Decode the settings blob into the integration's own type.
            ///
            /// A missing blob decodes as an empty object.
            pub fn metadata<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
                let decoded = match &self.metadata {
                    Some(metadata) => T::deserialize(metadata),
                    None => T::deserialize(&Value::Object(Default::default())),
                };
                decoded.map_err(|source| ModelError::ProviderMetadataUnreadable {
                    provider: self.name.clone(),
                    source,
                })
            }
        }
    };
}

impl_integration! {
    #[doc = "A registrar the configuration refers to by name."]
    pub struct RegistrarConfig
}

impl_integration! {
    #[doc = "A DNS provider the configuration refers to by name."]
    pub struct DNSProviderConfig
}

/// Everything the planner works from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DNSConfig {
    #[serde(default)]
    pub registrars: Vec<RegistrarConfig>,

    #[serde(default, rename = "dns_providers")]
    pub dns_providers: Vec<DNSProviderConfig>,

    #[serde(default)]
    pub domains: Vec<DomainConfig>,
}

impl DNSConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl io::Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn read_from_file(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading configuration: {path}");

        let buf = fs::read_to_string(path).map_err(|source| {
            error!("failed to read {path}: {source:?}");
            ConfigError::Io {
                path: path.to_owned(),
                source,
            }
        })?;

        let config = Self::from_json_str(&buf).inspect_err(|e| {
            error!("failed to parse {path}: {e}");
        })?;

        info!(
            "configuration loaded: {} domains with {} records",
            config.domains.len(),
            config
                .domains
                .iter()
                .map(|domain| domain.records().len())
                .sum::<usize>()
        );
        debug!("configuration: {:#?}", config);
        Ok(config)
    }

    /// First domain named `name`, if any.
    pub fn find_domain(&self, name: &str) -> Option<&DomainConfig> {
        self.domains.iter().find(|domain| domain.name() == name)
    }

    pub fn find_domain_mut(&mut self, name: &str) -> Option<&mut DomainConfig> {
        self.domains.iter_mut().find(|domain| domain.name() == name)
    }

    pub fn find_registrar(&self, name: &str) -> Option<&RegistrarConfig> {
        self.registrars.iter().find(|registrar| registrar.name == name)
    }

    pub fn find_dns_provider(&self, name: &str) -> Option<&DNSProviderConfig> {
        self.dns_providers.iter().find(|provider| provider.name == name)
    }
}
