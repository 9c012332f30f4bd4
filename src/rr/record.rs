use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

use super::{
    handle::ProviderHandle,
    name::{NameError, RecordName},
    rset::RecordKey,
    ttl::TimeToLive,
};

/// One DNS record, as configured or as read back from a provider.
///
/// Records are validated or normalized by whoever builds them; the model only
/// guarantees that the short name and FQDN agree (see [`RecordName`]).
///
/// Equality covers type, name, target, TTL, priority and metadata. The
/// provider handle never takes part in it.
#[derive(Debug, Clone)]
pub struct RecordConfig {
    record_type: String,
    name: RecordName,
    target: String,
    ttl: TimeToLive,
    priority: u16,
    metadata: BTreeMap<String, String>,
    original: Option<ProviderHandle>,
}

impl RecordConfig {
    pub fn new(record_type: impl Into<String>, name: RecordName, target: impl Into<String>) -> Self {
        RecordConfig {
            record_type: record_type.into(),
            name,
            target: target.into(),
            ttl: TimeToLive::ZERO,
            priority: 0,
            metadata: BTreeMap::new(),
            original: None,
        }
    }

    pub fn with_ttl(mut self, ttl: impl Into<TimeToLive>) -> Self {
        self.ttl = ttl.into();
        self
    }

    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_original(mut self, original: ProviderHandle) -> Self {
        self.original = Some(original);
        self
    }
}

impl RecordConfig {
    /// Type tag, such as `A` or `MX`.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn name(&self) -> &RecordName {
        &self.name
    }

    /// Short name, [`super::APEX`] for the zone itself.
    pub fn short_name(&self) -> &str {
        self.name.short()
    }

    /// Fully qualified name without a trailing dot.
    pub fn fqdn(&self) -> &str {
        self.name.fqdn()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Configured TTL, zero when the default applies.
    pub fn ttl(&self) -> TimeToLive {
        self.ttl
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata
    }

    /// Provider-native record this one was read from, if any.
    pub fn original(&self) -> Option<&ProviderHandle> {
        self.original.as_ref()
    }

    /// Grouping key for diffing: type and short name.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.record_type.clone(), self.name.short())
    }
}

impl RecordConfig {
    /// Rename within the same zone, deriving the new FQDN.
    pub fn set_name(&mut self, short: impl AsRef<str>) -> Result<(), NameError> {
        self.name = RecordName::new(short, self.name.origin())?;
        Ok(())
    }

    /// Rename within the same zone from a fully qualified name.
    pub fn set_fqdn(&mut self, fqdn: impl AsRef<str>) -> Result<(), NameError> {
        self.name = RecordName::from_fqdn(fqdn, self.name.origin())?;
        Ok(())
    }

    pub fn set_record_name(&mut self, name: RecordName) {
        self.name = name;
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    pub fn set_ttl(&mut self, ttl: impl Into<TimeToLive>) {
        self.ttl = ttl.into();
    }

    pub fn set_priority(&mut self, priority: u16) {
        self.priority = priority;
    }

    pub fn set_original(&mut self, original: Option<ProviderHandle>) -> Option<ProviderHandle> {
        std::mem::replace(&mut self.original, original)
    }

    /// Fold the MX priority into the front of the target.
    ///
    /// For providers that keep preference and exchange in one field. Only MX
    /// records with a non-zero priority and a target without a space are
    /// touched, so calling this again is a no-op.
    pub fn inline_mx_priority(&mut self) {
        if self.record_type == "MX" && self.priority != 0 && !self.target.contains(' ') {
            self.target = format!("{} {}", self.priority, self.target);
            self.priority = 0;
        }
    }

    /// Independent copy of this record.
    ///
    /// Goes through a private serialized form, re-deriving the FQDN from the
    /// origin. The provider handle is not carried over.
    #[tracing::instrument(skip_all, fields(record = %self.name), level = "trace")]
    pub fn copy(&self) -> Result<RecordConfig, ModelError> {
        let encoded = serde_json::to_value(self).map_err(ModelError::CopyFailure)?;
        let repr: RecordRepr = serde_json::from_value(encoded).map_err(ModelError::CopyFailure)?;
        let record = repr.into_record(self.name.origin())?;
        tracing::trace!("copied {record}");
        Ok(record)
    }
}

impl PartialEq for RecordConfig {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type
            && self.name == other.name
            && self.target == other.target
            && self.ttl == other.ttl
            && self.priority == other.priority
            && self.metadata == other.metadata
    }
}

impl Eq for RecordConfig {}

impl fmt::Display for RecordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.record_type, self.name, self.target, self.ttl
        )?;
        if self.record_type == "MX" {
            write!(f, " priority={}", self.priority)?;
        }
        for (key, value) in &self.metadata {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

impl Serialize for RecordConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RecordRepr::from(self).serialize(serializer)
    }
}

/// Serialized form of a record: the short name only, as in configuration files.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RecordRepr {
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    target: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "TimeToLive::is_zero"
    )]
    ttl: TimeToLive,
    #[serde(
        default,
        rename = "meta",
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    metadata: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    priority: u16,
}

fn is_zero(value: &u16) -> bool {
    *value == 0
}

/// Read an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RecordRepr {
    /// Attach the record to zone `origin`, deriving its FQDN.
    pub(crate) fn into_record(self, origin: &str) -> Result<RecordConfig, NameError> {
        let name = RecordName::new(&self.name, origin)?;
        Ok(RecordConfig {
            record_type: self.record_type,
            name,
            target: self.target,
            ttl: self.ttl,
            priority: self.priority,
            metadata: self.metadata,
            original: None,
        })
    }
}

impl From<&RecordConfig> for RecordRepr {
    fn from(record: &RecordConfig) -> Self {
        RecordRepr {
            record_type: record.record_type.clone(),
            name: record.name.short().to_owned(),
            target: record.target.clone(),
            ttl: record.ttl,
            metadata: record.metadata.clone(),
            priority: record.priority,
        }
    }
}
