//! Provider-agnostic models of DNS zones and records.
//!
//! Configuration loading builds a [`DNSConfig`] of [`DomainConfig`] zones,
//! each holding [`rr::RecordConfig`] records. A planner groups records by
//! [`rr::RecordKey`], copies zone state before diffing, converts records to
//! hickory resource records when talking to name servers, and expresses the
//! resulting changes as [`Correction`]s.

pub mod config;
pub mod correction;
pub mod domain;
pub mod error;
pub mod rr;

pub use self::config::{ConfigError, DNSConfig, DNSProviderConfig, RegistrarConfig};
pub use self::correction::{Correction, CorrectionError};
pub use self::domain::{DomainConfig, Nameserver};
pub use self::error::ModelError;
