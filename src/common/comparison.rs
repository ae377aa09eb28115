use super::{Diffable, Record};

/// The reconciliation plan: local records to create, matched pairs
/// that drifted, and remote records with no local counterpart.
#[derive(Debug)]
pub struct DiffResult<R> {
    pub create: Vec<Record>,
    pub update: Vec<(R, Record)>,
    pub delete: Vec<R>,
}

impl<R> DiffResult<R> {
    pub fn len(&self) -> usize {
        self.create.len() + self.update.len() + self.delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Diff the fetched remote state against the authority records from
/// the zone file. Pure; the caller decides how to execute the plan.
///
/// Matching is a linear scan per record, first match wins. Remote
/// zones are small enough that an index would not pay for itself.
pub fn diff_records<R: Diffable>(current: Vec<R>, authority: Vec<Record>) -> DiffResult<R> {
    let mut create: Vec<Record> = Vec::new();
    let mut update: Vec<(R, Record)> = Vec::new();
    let mut delete: Vec<R> = Vec::new();

    for record in &authority {
        if !current.iter().any(|r| r.matches(record)) {
            create.push(record.clone());
        }
    }

    for record in current {
        match authority.iter().find(|a| record.matches(a)) {
            Some(authority) => {
                if record.drifted(authority) {
                    update.push((record, authority.clone()));
                }
            }
            None => delete.push(record),
        }
    }

    DiffResult {
        create,
        update,
        delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RecordData;

    #[derive(Debug, Clone, PartialEq)]
    struct Remote {
        id: String,
        kind: String,
        name: String,
        content: String,
        ttl: u32,
    }

    fn remote(id: &str, kind: &str, name: &str, content: &str, ttl: u32) -> Remote {
        Remote {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            content: content.into(),
            ttl,
        }
    }

    impl Diffable for Remote {
        fn matches(&self, authority: &Record) -> bool {
            if self.kind == "MX" && authority.kind() == "MX" {
                self.name == authority.name && self.content == authority.content()
            } else {
                self.kind == authority.kind() && self.name == authority.name
            }
        }

        fn drifted(&self, authority: &Record) -> bool {
            self.content != authority.content() || self.ttl != authority.ttl
        }
    }

    fn a(name: &str, address: &str, ttl: u32) -> Record {
        Record {
            name: name.into(),
            ttl,
            data: RecordData::A {
                address: address.into(),
            },
        }
    }

    fn mx(name: &str, exchange: &str, priority: u16, ttl: u32) -> Record {
        Record {
            name: name.into(),
            ttl,
            data: RecordData::Mx {
                priority,
                exchange: exchange.into(),
            },
        }
    }

    #[test]
    fn missing_remote_record_is_created() {
        let diff = diff_records(Vec::<Remote>::new(), vec![a("www.example.com", "1.2.3.4", 300)]);
        assert_eq!(diff.create, vec![a("www.example.com", "1.2.3.4", 300)]);
        assert!(diff.update.is_empty());
        assert!(diff.delete.is_empty());
    }

    #[test]
    fn ttl_drift_triggers_an_update() {
        let remote = remote("r1", "A", "www.example.com", "1.2.3.4", 300);
        let diff = diff_records(vec![remote.clone()], vec![a("www.example.com", "1.2.3.4", 600)]);
        assert!(diff.create.is_empty());
        assert!(diff.delete.is_empty());
        assert_eq!(diff.update.len(), 1);
        assert_eq!(diff.update[0].0, remote);
        assert_eq!(diff.update[0].1.ttl, 600);
    }

    #[test]
    fn matching_record_without_drift_is_untouched() {
        let remote = remote("r1", "A", "www.example.com", "1.2.3.4", 300);
        let diff = diff_records(vec![remote], vec![a("www.example.com", "1.2.3.4", 300)]);
        assert!(diff.is_empty());
    }

    #[test]
    fn unmatched_remote_record_is_deleted() {
        let remote = remote("r1", "TXT", "example.com", "v=spf1 -all", 300);
        let diff = diff_records(vec![remote.clone()], vec![]);
        assert_eq!(diff.delete, vec![remote]);
        assert!(diff.create.is_empty());
        assert!(diff.update.is_empty());
    }

    #[test]
    fn a_record_matches_on_name_despite_content_change() {
        let remote = remote("r1", "A", "www.example.com", "1.2.3.4", 300);
        let diff = diff_records(vec![remote], vec![a("www.example.com", "5.6.7.8", 300)]);
        assert!(diff.create.is_empty());
        assert!(diff.delete.is_empty());
        assert_eq!(diff.update.len(), 1);
        assert_eq!(diff.update[0].1.content(), "5.6.7.8");
    }

    #[test]
    fn mx_records_with_different_exchanges_never_match() {
        let remote = remote("r1", "MX", "example.com", "old-mail.example.com", 300);
        let diff = diff_records(
            vec![remote.clone()],
            vec![mx("example.com", "mail.example.com", 10, 300)],
        );
        // Replaced, never updated in place.
        assert_eq!(diff.create.len(), 1);
        assert_eq!(diff.delete, vec![remote]);
        assert!(diff.update.is_empty());
    }

    #[test]
    fn create_and_delete_sets_are_disjoint() {
        let current = vec![
            remote("r1", "A", "www.example.com", "1.2.3.4", 300),
            remote("r2", "CNAME", "cdn.example.com", "edge.example.net", 300),
        ];
        let authority = vec![
            a("www.example.com", "1.2.3.4", 300),
            a("api.example.com", "9.9.9.9", 120),
        ];
        let diff = diff_records(current, authority);
        for created in &diff.create {
            assert!(!diff.delete.iter().any(|r| r.matches(created)));
        }
        assert_eq!(diff.create.len(), 1);
        assert_eq!(diff.delete.len(), 1);
    }

    #[test]
    fn rerunning_after_apply_yields_an_empty_plan() {
        let current = vec![
            remote("r1", "A", "www.example.com", "1.2.3.4", 300),
            remote("r2", "TXT", "example.com", "stale", 300),
        ];
        let authority = vec![
            a("www.example.com", "1.2.3.4", 600),
            a("api.example.com", "9.9.9.9", 120),
        ];

        let diff = diff_records(current.clone(), authority.clone());

        // Apply the plan to the remote set by hand.
        let mut synced: Vec<Remote> = current
            .into_iter()
            .filter(|r| !diff.delete.contains(r))
            .map(|r| match diff.update.iter().find(|(u, _)| *u == r) {
                Some((_, authority)) => Remote {
                    content: authority.content().to_string(),
                    ttl: authority.ttl,
                    ..r
                },
                None => r,
            })
            .collect();
        for record in &diff.create {
            synced.push(remote(
                "new",
                record.kind(),
                &record.name,
                record.content(),
                record.ttl,
            ));
        }

        assert!(diff_records(synced, authority).is_empty());
    }
}
