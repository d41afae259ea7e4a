//! Extension-keyed dispatch table.
//!
//! Every input ends up here: archives are handed to the [`Flattener`], binary
//! documents to their decoder, and anything else is read as plain text. Adding
//! a format means registering one more decoder in the table.

use crate::aggregate::Batch;
use crate::flatten::Flattener;
use crate::formats::{self, TextDecoder};
use crate::pattern::EmailMatcher;
use crate::{archive, ExtractorSettings};
use futures::future::{BoxFuture, FutureExt};
use shared_types::{
    ArchiveDecoder, ArchiveFormat, DecodedContent, DocumentDecoder, DocumentFormat, EmailSet,
    ExtractionError, FileKind, NamedBlob,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
enum Handler {
    Archive(Arc<dyn ArchiveDecoder>),
    Document(Arc<dyn DocumentDecoder>),
}

/// Where a blob goes, decided from its extension alone.
#[derive(Clone)]
pub enum Route {
    Archive(Arc<dyn ArchiveDecoder>),
    Document(Arc<dyn DocumentDecoder>),
    /// A recognised format whose decoder is not registered.
    Unsupported(String),
    PlainText,
}

pub struct Dispatcher {
    table: HashMap<String, Handler>,
    text: TextDecoder,
    matcher: EmailMatcher,
}

impl Dispatcher {
    /// Dispatch table with every known format except the disabled ones.
    pub fn new(settings: &ExtractorSettings) -> Self {
        let mut dispatcher = Self::empty(settings.lossy_text);

        for format in ArchiveFormat::ALL {
            if settings.is_enabled(format.extension()) {
                dispatcher.register_archive(archive::decoder_for(format));
            }
        }
        for format in DocumentFormat::ALL {
            if settings.is_enabled(format.extension()) {
                dispatcher.register_document(formats::decoder_for(format));
            }
        }

        debug!("Dispatch table: {:?}", dispatcher.extensions());
        dispatcher
    }

    /// Dispatch table with nothing registered: every input is plain text
    /// unless its extension is a recognised format.
    pub fn empty(lossy_text: bool) -> Self {
        Self {
            table: HashMap::new(),
            text: TextDecoder::new(lossy_text),
            matcher: EmailMatcher::new(),
        }
    }

    pub fn register_archive(&mut self, decoder: Arc<dyn ArchiveDecoder>) {
        for extension in decoder.extensions() {
            self.table
                .insert(extension.to_string(), Handler::Archive(decoder.clone()));
        }
    }

    pub fn register_document(&mut self, decoder: Arc<dyn DocumentDecoder>) {
        for extension in decoder.extensions() {
            self.table
                .insert(extension.to_string(), Handler::Document(decoder.clone()));
        }
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.table.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    pub fn matcher(&self) -> &EmailMatcher {
        &self.matcher
    }

    pub fn route(&self, extension: Option<&str>) -> Route {
        let Some(extension) = extension else {
            return Route::PlainText;
        };

        match self.table.get(extension) {
            Some(Handler::Archive(decoder)) => Route::Archive(decoder.clone()),
            Some(Handler::Document(decoder)) => Route::Document(decoder.clone()),
            None if FileKind::classify(Some(extension)) != FileKind::PlainText => {
                Route::Unsupported(extension.to_string())
            }
            None => Route::PlainText,
        }
    }

    /// Extract from one blob. `origin` is the slash-joined path of the
    /// archives it came out of, empty at the top level.
    pub fn dispatch(&self, blob: NamedBlob, origin: String) -> BoxFuture<'_, Batch> {
        async move {
            let extension = blob.extension();
            match self.route(extension.as_deref()) {
                Route::Archive(decoder) => Flattener::new(self).unpack(decoder, blob, origin).await,
                Route::Document(decoder) => {
                    let path = nested_path(&origin, &blob.name);
                    tokio::task::yield_now().await;
                    let decoded = decoder.decode(&blob.bytes);
                    self.match_decoded(path, decoded).await
                }
                Route::Unsupported(extension) => {
                    let path = nested_path(&origin, &blob.name);
                    warn!("No decoder registered for {}: {}", extension, path);
                    Batch::failed(path, ExtractionError::unsupported(extension))
                }
                Route::PlainText => {
                    let path = nested_path(&origin, &blob.name);
                    let decoded = self.text.decode(&blob.bytes);
                    self.match_decoded(path, decoded).await
                }
            }
        }
        .boxed()
    }

    async fn match_decoded(
        &self,
        path: String,
        decoded: Result<DecodedContent, ExtractionError>,
    ) -> Batch {
        match decoded {
            Ok(content) if content.is_empty() => {
                debug!("{}: no text", path);
                Batch::matched(EmailSet::new())
            }
            Ok(content) => {
                tokio::task::yield_now().await;
                let emails = self.matcher.match_content(&content);
                debug!("{}: {} addresses", path, emails.len());
                Batch::matched(emails)
            }
            Err(e) => {
                warn!("Failed to decode {}: {}", path, e);
                Batch::failed(path, e)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&ExtractorSettings::default())
    }
}

/// `origin/name`; an empty `name` stands for `origin` itself.
pub(crate) fn nested_path(origin: &str, name: &str) -> String {
    if name.is_empty() {
        origin.to_string()
    } else if origin.is_empty() {
        name.to_string()
    } else {
        format!("{origin}/{name}")
    }
}
