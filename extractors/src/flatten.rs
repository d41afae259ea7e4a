//! Recursive archive traversal.
//!
//! Unpacked entries fan out concurrently. Sibling results are joined in
//! enumeration order, so the output never depends on which branch finished
//! first.

use crate::aggregate::Batch;
use crate::dispatch::{nested_path, Dispatcher, Route};
use futures::future::{join_all, BoxFuture, FutureExt};
use shared_types::{ArchiveDecoder, ArchiveEntry, NamedBlob};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Flattener<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Flattener<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Unpack `blob` and flatten everything inside it.
    ///
    /// A container that cannot be opened becomes a single failure for its own
    /// path; siblings elsewhere in the tree are unaffected. Members that could
    /// not be read fail on their own paths next to the readable ones.
    pub fn unpack(
        &self,
        decoder: Arc<dyn ArchiveDecoder>,
        blob: NamedBlob,
        origin: String,
    ) -> BoxFuture<'a, Batch> {
        let flattener = Flattener::new(self.dispatcher);
        async move {
            let path = nested_path(&origin, &blob.name);
            tokio::task::yield_now().await;

            let entries = match decoder.unpack(&blob) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to unpack {}: {}", path, e);
                    return Batch::failed(path, e);
                }
            };
            drop(blob);

            let leaves: usize = entries.iter().map(ArchiveEntry::leaf_count).sum();
            debug!("Unpacked {} entries ({} leaves) from {}", entries.len(), leaves, path);
            flattener.flatten_all(entries, path).await
        }
        .boxed()
    }

    /// Route one entry: directories recurse, nested archives are unpacked
    /// again, unreadable members become failures, everything else goes to the
    /// dispatcher.
    pub fn flatten(&self, entry: ArchiveEntry, origin: String) -> BoxFuture<'a, Batch> {
        let flattener = Flattener::new(self.dispatcher);
        async move {
            match entry {
                ArchiveEntry::Directory { children, .. } => {
                    flattener.flatten_all(children, origin).await
                }
                ArchiveEntry::Leaf(blob) => {
                    let extension = blob.extension();
                    match flattener.dispatcher.route(extension.as_deref()) {
                        Route::Archive(decoder) => flattener.unpack(decoder, blob, origin).await,
                        _ => flattener.dispatcher.dispatch(blob, origin).await,
                    }
                }
                ArchiveEntry::Unreadable { path, error } => {
                    let path = nested_path(&origin, &path);
                    warn!("Failed to read {}: {}", path, error);
                    Batch::failed(path, error)
                }
            }
        }
        .boxed()
    }

    async fn flatten_all(&self, entries: Vec<ArchiveEntry>, origin: String) -> Batch {
        let branches = entries
            .into_iter()
            .map(|entry| self.flatten(entry, origin.clone()));
        Batch::join(join_all(branches).await)
    }
}
