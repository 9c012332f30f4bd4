use std::net::{IpAddr, Ipv4Addr};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpConversionError {
    #[error("{0} is not a valid ip address")]
    InvalidAddress(String),

    #[error("{0} does not fit an IPv4 address")]
    OutOfRange(String),

    #[error("cannot convert {0} to an ip address")]
    UnsupportedShape(&'static str),
}

/// An address as it shows up in loosely typed provider data: either an
/// IPv4 address packed into an integer, or text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum IpSource {
    Numeric(u32),
    Text(String),
}

impl IpSource {
    pub fn to_ip(&self) -> Result<IpAddr, IpConversionError> {
        match self {
            IpSource::Numeric(packed) => Ok(IpAddr::V4(Ipv4Addr::from(*packed))),
            IpSource::Text(text) => text
                .parse()
                .map_err(|_| IpConversionError::InvalidAddress(text.clone())),
        }
    }
}

impl From<u32> for IpSource {
    fn from(value: u32) -> Self {
        IpSource::Numeric(value)
    }
}

impl From<String> for IpSource {
    fn from(value: String) -> Self {
        IpSource::Text(value)
    }
}

impl From<&str> for IpSource {
    fn from(value: &str) -> Self {
        IpSource::Text(value.to_owned())
    }
}

impl TryFrom<&Value> for IpSource {
    type Error = IpConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(IpSource::Text(text.clone())),
            Value::Number(number) => {
                if let Some(packed) = number.as_u64() {
                    return u32::try_from(packed)
                        .map(IpSource::Numeric)
                        .map_err(|_| IpConversionError::OutOfRange(number.to_string()));
                }
                match number.as_f64() {
                    Some(float)
                        if float.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&float) =>
                    {
                        Ok(IpSource::Numeric(float as u32))
                    }
                    _ => Err(IpConversionError::OutOfRange(number.to_string())),
                }
            }
            Value::Null => Err(IpConversionError::UnsupportedShape("null")),
            Value::Bool(_) => Err(IpConversionError::UnsupportedShape("boolean")),
            Value::Array(_) => Err(IpConversionError::UnsupportedShape("array")),
            Value::Object(_) => Err(IpConversionError::UnsupportedShape("object")),
        }
    }
}

impl TryFrom<Value> for IpSource {
    type Error = IpConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        IpSource::try_from(&value)
    }
}

/// Read an address out of a JSON value holding either form.
pub fn value_to_ip(value: &Value) -> Result<IpAddr, IpConversionError> {
    IpSource::try_from(value)?.to_ip()
}
