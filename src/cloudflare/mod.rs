mod client;
mod models;

pub use client::{Cloudflare, Credentials};
pub use models::{ApiError, DnsRecord, RecordPayload, Zone};
