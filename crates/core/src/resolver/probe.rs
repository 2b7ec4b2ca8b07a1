//! Probe combinators over the effective root list.
//!
//! Two aggregation policies exist and only two: a logical source file has
//! one authoritative definition, so the first root that has it wins
//! (`first_hit`); dependency manifests and reader registrations appear
//! once per contributing library, so every hit matters (`collect_hits`).
//! Per-candidate failures are never surfaced by either: a root that
//! cannot be probed counts the same as a root without the resource.

use crate::error::Result;
use futures::future::join_all;
use std::future::Future;
use std::path::PathBuf;
use tracing::debug;

/// Probes roots strictly in order, sequentially; returns on the first
/// `Ok(Some(_))`. Failed candidates are logged and skipped.
pub async fn first_hit<T, F, Fut>(roots: Vec<PathBuf>, mut probe: F) -> Option<T>
where
    F: FnMut(PathBuf) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    for root in roots {
        let candidate = root.display().to_string();
        match probe(root).await {
            Ok(Some(hit)) => return Some(hit),
            Ok(None) => {}
            Err(e) => debug!("skipping candidate {candidate}: {e}"),
        }
    }
    None
}

/// Probes every root and keeps every hit. Per-root I/O may overlap; the
/// result is ordered by root index, never by completion time.
pub async fn collect_hits<T, F, Fut>(roots: Vec<PathBuf>, probe: F) -> Vec<T>
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let outcomes = join_all(roots.iter().cloned().map(&probe)).await;

    let mut hits = Vec::new();
    for (root, outcome) in roots.iter().zip(outcomes) {
        match outcome {
            Ok(found) => hits.extend(found),
            Err(e) => debug!("skipping candidate {}: {e}", root.display()),
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadpathError;
    use std::sync::Mutex;

    fn roots(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn io_error() -> LoadpathError {
        LoadpathError::Io(std::io::Error::other("probe failed"))
    }

    #[tokio::test]
    async fn test_first_hit_returns_earliest_match() {
        let probed = Mutex::new(Vec::new());

        let hit = first_hit(roots(&["/a", "/b", "/c"]), |root| {
            probed.lock().unwrap().push(root.clone());
            async move {
                if root == PathBuf::from("/b") || root == PathBuf::from("/c") {
                    Ok(Some(root))
                } else {
                    Ok(None)
                }
            }
        })
        .await;

        assert_eq!(hit, Some(PathBuf::from("/b")));
        // short-circuits: /c is never probed
        assert_eq!(*probed.lock().unwrap(), roots(&["/a", "/b"]));
    }

    #[tokio::test]
    async fn test_first_hit_swallows_failures() {
        let hit = first_hit(roots(&["/a", "/b"]), |root| async move {
            if root == PathBuf::from("/a") {
                Err(io_error())
            } else {
                Ok(Some(root))
            }
        })
        .await;

        assert_eq!(hit, Some(PathBuf::from("/b")));
    }

    #[tokio::test]
    async fn test_first_hit_none_when_all_fail() {
        let hit: Option<()> =
            first_hit(roots(&["/a", "/b"]), |_| async { Err(io_error()) }).await;
        assert_eq!(hit, None);
    }

    #[tokio::test]
    async fn test_collect_hits_keeps_every_match_in_root_order() {
        let hits = collect_hits(roots(&["/a", "/b", "/c"]), |root| async move {
            if root == PathBuf::from("/b") {
                Err(io_error())
            } else {
                Ok(vec![root])
            }
        })
        .await;

        assert_eq!(hits, roots(&["/a", "/c"]));
    }
}
