//! Zones and their delegation

use std::collections::BTreeMap;

use hickory_proto::{
    ProtoError,
    rr::{Name, rdata::NS},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ModelError,
    rr::{
        AsHickory, NameError, RecordConfig, RecordName, RecordRepr, Records, normalize_origin,
        null_as_default,
    },
};

/// One zone: its records, where it is registered, and who serves it.
///
/// The zone name is the origin of every record in it, so it can only be set
/// at construction. Deserializing a domain derives each record's FQDN from
/// the domain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DomainRepr")]
pub struct DomainConfig {
    name: String,

    /// Registrar responsible for the domain, by name.
    pub registrar: String,

    /// DNS providers serving the zone, by name, with their weight.
    #[serde(rename = "dnsProviders")]
    pub dns_providers: BTreeMap<String, i64>,

    #[serde(rename = "meta", skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    records: Records,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<Nameserver>>,

    /// Leave records this tool does not manage alone when reconciling.
    #[serde(rename = "keepunknown")]
    pub keep_unknown: bool,
}

impl DomainConfig {
    /// An empty zone. A single trailing dot on `name` is dropped.
    pub fn new(name: impl AsRef<str>) -> Result<Self, NameError> {
        let name = normalize_origin(name.as_ref())?;
        Ok(DomainConfig {
            name: name.to_owned(),
            registrar: String::new(),
            dns_providers: BTreeMap::new(),
            metadata: BTreeMap::new(),
            records: Records::new(),
            nameservers: None,
            keep_unknown: false,
        })
    }

    /// Zone name, without a trailing dot.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Mutable access to the records.
    ///
    /// Records placed here must already be named within this zone; use
    /// [`DomainConfig::add_record`] to rebase one from elsewhere.
    pub fn records_mut(&mut self) -> &mut Records {
        &mut self.records
    }

    /// Name a record within this zone.
    pub fn record_name(&self, short: impl AsRef<str>) -> Result<RecordName, NameError> {
        RecordName::new(short, &self.name)
    }

    /// Append a record, re-deriving its FQDN within this zone.
    pub fn add_record(&mut self, mut record: RecordConfig) -> Result<(), NameError> {
        if record.name().origin() != self.name {
            let name = self.record_name(record.short_name())?;
            record.set_record_name(name);
        }
        self.records.push(record);
        Ok(())
    }

    /// Whether any record has type `record_type` and short name `name`.
    pub fn has_record_type_name(&self, record_type: &str, name: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.record_type() == record_type && record.short_name() == name)
    }

    /// Independent copy of this zone.
    ///
    /// Goes through a private serialized form. Provider handles on records are
    /// not carried over. Every record must belong to this zone; one that was
    /// pushed through [`DomainConfig::records_mut`] with another origin is an
    /// error rather than being moved.
    #[tracing::instrument(skip_all, fields(domain = %self.name), level = "trace")]
    pub fn copy(&self) -> Result<DomainConfig, ModelError> {
        if let Some(stray) = self
            .records
            .iter()
            .find(|record| record.name().origin() != self.name)
        {
            tracing::debug!("record {stray} is outside the zone");
            return Err(NameError::OutsideZone {
                fqdn: stray.fqdn().to_owned(),
                origin: self.name.clone(),
            }
            .into());
        }

        let encoded = serde_json::to_value(self).map_err(ModelError::CopyFailure)?;
        let domain: DomainConfig =
            serde_json::from_value(encoded).map_err(ModelError::CopyFailure)?;
        tracing::trace!("copied {} records", domain.records.len());
        Ok(domain)
    }
}

#[derive(Debug, Deserialize)]
struct DomainRepr {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    registrar: String,
    #[serde(default, rename = "dnsProviders", deserialize_with = "null_as_default")]
    dns_providers: BTreeMap<String, i64>,
    #[serde(default, rename = "meta", deserialize_with = "null_as_default")]
    metadata: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    records: Vec<RecordRepr>,
    #[serde(default)]
    nameservers: Option<Vec<Nameserver>>,
    #[serde(default, rename = "keepunknown", deserialize_with = "null_as_default")]
    keep_unknown: bool,
}

impl TryFrom<DomainRepr> for DomainConfig {
    type Error = NameError;

    fn try_from(repr: DomainRepr) -> Result<Self, Self::Error> {
        let mut domain = DomainConfig::new(&repr.name)?;
        let records = repr
            .records
            .into_iter()
            .map(|record| record.into_record(&domain.name))
            .collect::<Result<Records, _>>()?;

        domain.registrar = repr.registrar;
        domain.dns_providers = repr.dns_providers;
        domain.metadata = repr.metadata;
        domain.records = records;
        domain.nameservers = repr.nameservers;
        domain.keep_unknown = repr.keep_unknown;
        Ok(domain)
    }
}

/// A nameserver a zone is delegated to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NameserverRepr")]
pub struct Nameserver {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

impl Nameserver {
    /// A nameserver by name. A trailing dot is dropped.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        Nameserver {
            name: name.strip_suffix('.').unwrap_or(name).to_owned(),
            target: None,
        }
    }

    /// Glue address for the nameserver.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        let target = target.into();
        self.target = if target.is_empty() { None } else { Some(target) };
        self
    }

    /// Build nameservers from plain names.
    pub fn from_names<I, S>(names: I) -> Vec<Nameserver>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().map(Nameserver::new).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl AsHickory for Nameserver {
    type Hickory = NS;
    type Error = ProtoError;

    fn as_hickory(&self) -> Result<Self::Hickory, Self::Error> {
        Ok(NS(Name::from_utf8(format!("{}.", self.name))?))
    }
}

#[derive(Debug, Deserialize)]
struct NameserverRepr {
    name: String,
    #[serde(default)]
    target: Option<String>,
}

impl From<NameserverRepr> for Nameserver {
    fn from(repr: NameserverRepr) -> Self {
        let nameserver = Nameserver::new(repr.name);
        match repr.target {
            Some(target) => nameserver.with_target(target),
            None => nameserver,
        }
    }
}
