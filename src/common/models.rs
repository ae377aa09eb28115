pub const RECORD_KIND_A: &str = "A";
pub const RECORD_KIND_CNAME: &str = "CNAME";
pub const RECORD_KIND_MX: &str = "MX";
pub const RECORD_KIND_TXT: &str = "TXT";

/// The data half of a canonical record. Only MX carries a preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A { address: String },
    Cname { target: String },
    Mx { priority: u16, exchange: String },
    Txt { text: String },
}

/// A record read from the local zone file, fully qualified and
/// lower-cased. Local records never carry a provider id or a
/// proxied flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub ttl: u32,
    pub data: RecordData,
}

impl Record {
    pub fn kind(&self) -> &'static str {
        match self.data {
            RecordData::A { .. } => RECORD_KIND_A,
            RecordData::Cname { .. } => RECORD_KIND_CNAME,
            RecordData::Mx { .. } => RECORD_KIND_MX,
            RecordData::Txt { .. } => RECORD_KIND_TXT,
        }
    }

    pub fn content(&self) -> &str {
        match &self.data {
            RecordData::A { address } => address,
            RecordData::Cname { target } => target,
            RecordData::Mx { exchange, .. } => exchange,
            RecordData::Txt { text } => text,
        }
    }

    pub fn priority(&self) -> Option<u16> {
        match self.data {
            RecordData::Mx { priority, .. } => Some(priority),
            _ => None,
        }
    }
}

/// Remote state that can be diffed against authority records.
pub trait Diffable {
    /// Whether this record occupies the same slot as `authority`.
    /// MX records match on (kind, name, content), everything else
    /// on (kind, name).
    fn matches(&self, authority: &Record) -> bool;

    /// Whether content or ttl drifted from the authority record.
    /// Only meaningful when `matches` holds.
    fn drifted(&self, authority: &Record) -> bool;
}
