//! Record definitions for the zone model

mod handle;
mod ip;
mod name;
mod record;
mod rset;
mod ttl;
mod wire;

pub use self::handle::ProviderHandle;
pub use self::ip::{IpConversionError, IpSource, value_to_ip};
pub use self::name::{APEX, NameError, RecordName};
pub use self::record::RecordConfig;
pub(crate) use self::name::normalize_origin;
pub(crate) use self::record::{RecordRepr, null_as_default};
pub use self::rset::{RecordKey, Records};
pub use self::ttl::TimeToLive;

/// Trait for converting model types to their hickory-dns equivalents
///
/// Conversion can fail, since model values are only as well formed as the
/// configuration or provider data they were built from.
pub trait AsHickory {
    /// The corresponding hickory-dns type
    type Hickory;

    /// Error raised when the value has no hickory-dns equivalent
    type Error;

    /// Convert this type to its hickory-dns equivalent
    fn as_hickory(&self) -> Result<Self::Hickory, Self::Error>;
}
