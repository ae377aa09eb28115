//! Reads a local zone file into the canonical record list.
//!
//! The heavy lifting is hickory's zone-file parser; this module only
//! strips the record kinds the provider cannot hold and normalizes
//! names to fully-qualified, dot-trimmed, lower-case form.

use std::fs;
use std::path::Path;

use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{Name, RData, Record as RrRecord};
use hickory_proto::serialize::txt::Parser;
use snafu::prelude::*;

use crate::common::{FileReadSnafu, ParseSnafu, Record, RecordData, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalZone {
    /// The apex domain, dot-trimmed and lower-cased.
    pub origin: String,
    pub records: Vec<Record>,
}

pub fn read_zone(path: &Path) -> Result<LocalZone> {
    let contents = fs::read_to_string(path).context(FileReadSnafu { path })?;
    parse_zone(&contents)
}

/// Parse zone file text. ALIAS lines are dropped up front because the
/// grammar does not know the type; the `$ORIGIN` directive in the
/// file decides the apex.
pub fn parse_zone(contents: &str) -> Result<LocalZone> {
    let stripped = strip_alias_records(contents);
    let (origin, sets) = Parser::new(stripped, None, None).parse().context(ParseSnafu)?;

    let mut records: Vec<Record> = Vec::new();
    for set in sets.values() {
        for record in set.records_without_rrsigs() {
            if let Some(record) = convert(record) {
                records.push(record);
            }
        }
    }

    Ok(LocalZone {
        origin: normalize_name(&origin),
        records,
    })
}

/// Map a parsed record onto the canonical model. Anything other than
/// A, CNAME, MX and TXT is dropped.
fn convert(record: &RrRecord) -> Option<Record> {
    let data = match record.data()? {
        RData::A(address) => RecordData::A {
            address: address.0.to_string(),
        },
        RData::CNAME(target) => RecordData::Cname {
            target: normalize_name(&target.0),
        },
        RData::MX(mx) => RecordData::Mx {
            priority: mx.preference(),
            exchange: normalize_name(mx.exchange()),
        },
        RData::TXT(txt) => RecordData::Txt {
            text: txt_content(txt),
        },
        _ => return None,
    };

    Some(Record {
        name: normalize_name(record.name()),
        ttl: record.ttl(),
        data,
    })
}

fn normalize_name(name: &Name) -> String {
    name.to_utf8().trim_end_matches('.').to_lowercase()
}

fn txt_content(txt: &TXT) -> String {
    txt.txt_data()
        .iter()
        .map(|part| String::from_utf8_lossy(part))
        .collect()
}

fn strip_alias_records(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !is_alias_record(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether the line's record-type field is ALIAS. The type field sits
/// after the owner name (absent when the line starts with blanks) and
/// the optional TTL and class fields, so TXT data mentioning ALIAS is
/// left alone.
fn is_alias_record(line: &str) -> bool {
    if line.trim_start().starts_with(';') {
        return false;
    }
    let mut fields = line.split_whitespace();
    if !line.starts_with([' ', '\t']) && fields.next().is_none() {
        return false;
    }
    for field in fields {
        if field.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if ["IN", "CH", "HS", "CS"]
            .iter()
            .any(|class| field.eq_ignore_ascii_case(class))
        {
            continue;
        }
        return field == "ALIAS";
    }
    false
}
