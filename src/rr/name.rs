use std::fmt;

use hickory_proto::ProtoError;

/// Short name that stands for the zone apex.
pub const APEX: &str = "@";

/// Reasons a (short name, origin) pair cannot form a record name.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    #[error("zone origin is empty")]
    EmptyOrigin,

    #[error("zone origin {0:?} is malformed")]
    MalformedOrigin(String),

    #[error("record name is empty, use \"@\" for the apex")]
    EmptyName,

    #[error("record name {0:?} must not end with '.'")]
    TrailingDot(String),

    #[error("{fqdn:?} is not inside zone {origin:?}")]
    OutsideZone { fqdn: String, origin: String },

    #[error("{name:?} is not a valid DNS name: {source}")]
    Malformed {
        name: String,
        #[source]
        source: ProtoError,
    },
}

/// The name of a record, held both relative to its zone and fully qualified.
///
/// Neither form carries a trailing dot. The apex is always the short name
/// [`APEX`], and its FQDN is the origin itself. A short name that happens to
/// equal the origin is taken literally, so `example.com` in zone
/// `example.com` is `example.com.example.com`.
///
/// The two forms can only be set together, through constructors that derive
/// one from the other and the zone origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordName {
    short: String,
    fqdn: String,
}

impl RecordName {
    /// Name a record `short` within zone `origin`.
    pub fn new(short: impl AsRef<str>, origin: impl AsRef<str>) -> Result<Self, NameError> {
        let origin = normalize_origin(origin.as_ref())?;
        let short = short.as_ref();

        if short.is_empty() {
            return Err(NameError::EmptyName);
        }
        if short.ends_with('.') {
            return Err(NameError::TrailingDot(short.to_owned()));
        }

        let fqdn = if short == APEX {
            origin.to_owned()
        } else {
            format!("{short}.{origin}")
        };

        if let Err(source) = hickory_proto::rr::Name::from_utf8(&fqdn) {
            return Err(NameError::Malformed { name: fqdn, source });
        }

        Ok(RecordName {
            short: short.to_owned(),
            fqdn,
        })
    }

    /// Name a record from its fully qualified name within zone `origin`.
    ///
    /// A single trailing dot on `fqdn` is accepted. The origin suffix is
    /// matched without regard to ASCII case.
    pub fn from_fqdn(fqdn: impl AsRef<str>, origin: impl AsRef<str>) -> Result<Self, NameError> {
        let origin = normalize_origin(origin.as_ref())?;
        let raw = fqdn.as_ref();
        let fqdn = raw.strip_suffix('.').unwrap_or(raw);

        if fqdn.eq_ignore_ascii_case(origin) {
            return RecordName::new(APEX, origin);
        }

        let short = fqdn
            .len()
            .checked_sub(origin.len() + 1)
            .filter(|&split| split > 0)
            .and_then(|split| {
                let suffix = fqdn.get(split..)?;
                let zone = suffix.strip_prefix('.')?;
                zone.eq_ignore_ascii_case(origin).then(|| &fqdn[..split])
            });

        match short {
            Some(short) => RecordName::new(short, origin),
            None => Err(NameError::OutsideZone {
                fqdn: raw.to_owned(),
                origin: origin.to_owned(),
            }),
        }
    }

    /// Name relative to the zone, [`APEX`] for the zone itself.
    pub fn short(&self) -> &str {
        &self.short
    }

    /// Fully qualified name, without a trailing dot.
    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// Origin of the zone this name was derived in.
    pub fn origin(&self) -> &str {
        if self.is_apex() {
            &self.fqdn
        } else {
            &self.fqdn[self.short.len() + 1..]
        }
    }

    pub fn is_apex(&self) -> bool {
        self.short == APEX
    }

    /// Absolute hickory name for this record's owner.
    pub fn to_hickory(&self) -> Result<hickory_proto::rr::Name, ProtoError> {
        hickory_proto::rr::Name::from_utf8(format!("{}.", self.fqdn))
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqdn)
    }
}

/// Strip a single trailing dot and reject empty or hollow origins.
pub(crate) fn normalize_origin(origin: &str) -> Result<&str, NameError> {
    let origin = origin.strip_suffix('.').unwrap_or(origin);
    if origin.is_empty() {
        return Err(NameError::EmptyOrigin);
    }
    if origin.split('.').any(str::is_empty) {
        return Err(NameError::MalformedOrigin(origin.to_owned()));
    }
    Ok(origin)
}
