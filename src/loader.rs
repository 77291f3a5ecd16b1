//! Batch loading across families, sequential or bounded-parallel.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;

use crate::family::{FontFamily, FontRegistrar};
use crate::resolver::AssetResolver;

/// Loads families in order, aborting on the first failure.
///
/// Families loaded before the failure stay loaded. Returns how many
/// families this call loaded; already-loaded families are skipped and not
/// counted.
pub fn load_sequential<R: FontRegistrar>(
    resolver: &AssetResolver,
    families: &[Arc<FontFamily>],
    registrar: &R,
) -> Result<u32> {
    let mut loaded = 0u32;
    for family in families {
        if family.load(resolver, registrar)? {
            loaded += 1;
        }
    }
    Ok(loaded)
}

/// Loads families with up to `max_concurrent` in flight at once.
///
/// Structured fan-out over a `JoinSet`: spawn until the bound and refill
/// as loads finish. Fail-fast: the first family error or join failure
/// propagates immediately and no further families are spawned; siblings
/// already running are left to finish on the blocking pool. Returns how
/// many families this call loaded.
pub async fn load_parallel<R>(
    resolver: Arc<AssetResolver>,
    families: &[Arc<FontFamily>],
    registrar: Arc<R>,
    max_concurrent: usize,
) -> Result<u32>
where
    R: FontRegistrar + Send + Sync + 'static,
{
    let max_concurrent = max_concurrent.max(1);
    let mut queue: VecDeque<Arc<FontFamily>> = families.iter().cloned().collect();
    let mut loaded = 0u32;
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some(family) = queue.pop_front() else {
                break;
            };
            let resolver = Arc::clone(&resolver);
            let registrar = Arc::clone(&registrar);
            join_set.spawn_blocking(move || family.load(&resolver, &*registrar));
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let did_load = res.map_err(|e| anyhow::anyhow!("family load task join: {}", e))??;
        if did_load {
            loaded += 1;
        }
    }

    Ok(loaded)
}
