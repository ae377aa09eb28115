use futures::future::{self, BoxFuture};

use crate::cloudflare::{Cloudflare, Credentials, DnsRecord, RecordPayload};
use crate::common::{diff_records, DiffResult, Error, Result, ZoneNotFoundSnafu};
use crate::config::Config;
use crate::zonefile;

/// One full reconciliation run: read the local zone, resolve the
/// remote zone, diff, apply.
pub async fn run(config: Config) -> Result<()> {
    let zone = zonefile::read_zone(&config.file)?;
    tracing::info!(
        origin = %zone.origin,
        records = zone.records.len(),
        "Loaded local zone"
    );

    let client = Cloudflare::new(Credentials {
        email: config.auth_email,
        key: config.auth_key,
    });

    let remote = match client.find_zone(&zone.origin).await? {
        Some(remote) => remote,
        None if config.auto_create => client.create_zone(&zone.origin).await?,
        None => return ZoneNotFoundSnafu { name: zone.origin }.fail(),
    };

    let current = client.list_records(&remote.id).await?;
    let diff = diff_records(current, zone.records);

    if diff.is_empty() {
        tracing::info!(zone = %remote.name, "No changes detected");
        return Ok(());
    }

    if config.dry_run {
        tracing::info!(
            zone = %remote.name,
            create = diff.create.len(),
            update = diff.update.len(),
            delete = diff.delete.len(),
            "Dry run completed"
        );
        return Ok(());
    }

    tracing::info!(
        zone = %remote.name,
        create = diff.create.len(),
        update = diff.update.len(),
        delete = diff.delete.len(),
        "Applying changes"
    );

    apply(&client, &remote.id, diff).await
}

/// Flatten the plan into one worklist and dispatch every operation at
/// once. The provider treats each record mutation independently, so
/// no ordering is needed; all failures are collected, not just the
/// first.
async fn apply(client: &Cloudflare, zone_id: &str, diff: DiffResult<DnsRecord>) -> Result<()> {
    let mut tasks: Vec<BoxFuture<'_, Result<()>>> = Vec::with_capacity(diff.len());

    for record in diff.create {
        let payload = RecordPayload::create(&record);
        tasks.push(Box::pin(async move {
            tracing::info!(
                kind = %payload.kind,
                name = %payload.name,
                content = %payload.content,
                "Creating record"
            );
            let created = client.create_record(zone_id, &payload).await?;
            tracing::debug!(record_id = %created.id, "Created record");
            Ok(())
        }));
    }

    for (current, authority) in diff.update {
        let payload = RecordPayload::update(&current, &authority);
        tasks.push(Box::pin(async move {
            tracing::info!(
                kind = %payload.kind,
                name = %payload.name,
                content = %payload.content,
                record_id = %current.id,
                "Updating record"
            );
            client.update_record(zone_id, &current.id, &payload).await?;
            Ok(())
        }));
    }

    for record in diff.delete {
        tasks.push(Box::pin(async move {
            tracing::info!(
                kind = %record.kind,
                name = %record.name,
                record_id = %record.id,
                "Deleting record"
            );
            client.delete_record(zone_id, &record.id).await
        }));
    }

    collect_failures(future::join_all(tasks).await)
}

/// Fan-in for the dispatched operations: success only when every
/// operation succeeded, otherwise every failure is reported, not
/// just the first.
fn collect_failures(results: Vec<Result<()>>) -> Result<()> {
    let failures: Vec<Error> = results.into_iter().filter_map(Result::err).collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Apply { failures })
    }
}
