//! Conversion of configured records to hickory resource records.

use std::str::FromStr as _;

use hickory_proto::{
    rr::{
        Name, RData, Record, RecordType,
        rdata::{MX, TXT},
    },
    serialize::txt::RDataParser,
};
use tracing::{debug, trace};

use crate::error::ModelError;

use super::{AsHickory, RecordConfig};

impl RecordConfig {
    /// Build the wire-format resource record for this record.
    ///
    /// The owner is the FQDN, the class is IN, and the TTL is the record's own
    /// or [`super::TimeToLive::DEFAULT`] when unset. MX records take their
    /// preference from the priority and their exchange from the target as
    /// written. TXT records carry the target as a single string with no
    /// unquoting. Every other type has its target parsed as zone file record
    /// data, which must be consumed completely.
    #[tracing::instrument(skip_all, fields(record = %self.name(), rtype = %self.record_type()), level = "trace")]
    pub fn to_resource_record(&self) -> Result<Record, ModelError> {
        let record_type = resolve_type(self.record_type())?;
        let ttl = u32::from(self.ttl().effective());

        let record = match record_type {
            RecordType::MX => {
                let owner = self.owner()?;
                let exchange = Name::from_str(self.target()).map_err(|error| {
                    debug!("MX exchange rejected: {error}");
                    ModelError::syntax(self.target(), self.record_type(), error)
                })?;
                Record::from_rdata(owner, ttl, RData::MX(MX::new(self.priority(), exchange)))
            }
            RecordType::TXT => {
                let owner = self.owner()?;
                let txt = TXT::new(vec![self.target().to_owned()]);
                Record::from_rdata(owner, ttl, RData::TXT(txt))
            }
            _ => self.parse_zone_line(record_type, ttl)?,
        };

        trace!("converted to {record}");
        Ok(record)
    }

    fn owner(&self) -> Result<Name, ModelError> {
        self.name()
            .to_hickory()
            .map_err(|error| ModelError::syntax(self.fqdn(), self.record_type(), error))
    }

    fn parse_zone_line(&self, record_type: RecordType, ttl: u32) -> Result<Record, ModelError> {
        let text = format!(
            "{}. {} IN {} {}",
            self.fqdn(),
            ttl,
            self.record_type(),
            self.target()
        );
        let reject = |reason: String| {
            debug!("zone line rejected: {text:?}: {reason}");
            ModelError::syntax(&text, self.record_type(), reason)
        };

        let owner = self.owner()?;
        let tokens = rdata_tokens(self.target()).map_err(reject)?;
        let mut tokens = tokens.iter().map(String::as_str);

        let rdata = RData::parse(record_type, tokens.by_ref(), Some(&Name::root()))
            .map_err(|error| {
                debug!("zone line rejected: {text:?}: {error}");
                ModelError::syntax(&text, self.record_type(), error)
            })?;

        if let Some(extra) = tokens.next() {
            return Err(reject(format!("unexpected {extra:?} after record data")));
        }

        Ok(Record::from_rdata(owner, ttl, rdata))
    }
}

/// Split record data into zone file tokens.
///
/// Quoted strings become a single token with `\X` and `\DDD` escapes
/// decoded. Parentheses only group, and `;` starts a comment. Control
/// characters other than tab are rejected, so the data cannot spill onto
/// another line.
fn rdata_tokens(data: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = data.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_control() && c != '\t' => {
                return Err(format!("control character {c:?} in record data"));
            }
            c if c.is_whitespace() || c == '(' || c == ')' => {
                chars.next();
            }
            ';' => break,
            '"' => {
                chars.next();
                let mut token = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => token.push(unescape(&mut chars)?),
                        Some(c) if c.is_control() && c != '\t' => {
                            return Err(format!("control character {c:?} in record data"));
                        }
                        Some(c) => token.push(c),
                        None => return Err("unclosed quoted string".to_owned()),
                    }
                }
                tokens.push(token);
            }
            _ => {
                let mut token = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | ';' | '"') {
                        break;
                    }
                    if c.is_control() {
                        return Err(format!("control character {c:?} in record data"));
                    }
                    token.push(c);
                    chars.next();
                }
                tokens.push(token);
            }
        }
    }

    Ok(tokens)
}

fn unescape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<char, String> {
    let first = chars.next().ok_or("dangling escape")?;
    if !first.is_ascii_digit() {
        return Ok(first);
    }

    let mut value = first.to_digit(10).unwrap_or_default();
    for _ in 0..2 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or("escape must be three decimal digits")?;
        value = value * 10 + digit;
    }
    u8::try_from(value)
        .map(char::from)
        .map_err(|_| format!("escape \\{value} is out of range"))
}

/// Map a type tag to its record type. Tags are matched exactly, upper case.
fn resolve_type(tag: &str) -> Result<RecordType, ModelError> {
    let invalid = || ModelError::InvalidRecordType {
        record_type: tag.to_owned(),
    };

    if tag.is_empty() || tag.chars().any(|c| c.is_ascii_lowercase()) {
        debug!("no such DNS type as {tag:?}");
        return Err(invalid());
    }

    RecordType::from_str(tag).map_err(|_| {
        debug!("no such DNS type as {tag:?}");
        invalid()
    })
}

impl AsHickory for RecordConfig {
    type Hickory = Record;
    type Error = ModelError;

    fn as_hickory(&self) -> Result<Self::Hickory, Self::Error> {
        self.to_resource_record()
    }
}
