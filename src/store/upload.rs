use crate::error::{ParseError, Result};
use crate::readers::workbook_reader::file_stem;
use crate::readers::{ParsedWorkbook, RowParser, SourceFormat, WorkbookReader};
use crate::store::{UploadSummary, WeatherStore};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedStore = Arc<RwLock<WeatherStore>>;

/// Runs the read-and-parse step of an upload against a shared store.
///
/// The write lock is held only to flip the loading flag and to swap in the
/// parsed records; reading and parsing happen outside it, so readers keep
/// seeing the previous data until the upload completes.
#[derive(Clone)]
pub struct UploadCoordinator {
    store: SharedStore,
    parser: RowParser,
}

impl UploadCoordinator {
    pub fn new(store: SharedStore) -> Self {
        Self::with_parser(store, RowParser::new())
    }

    pub fn with_parser(store: SharedStore, parser: RowParser) -> Self {
        Self { store, parser }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Fails with `UploadInProgress` if another upload has not finished yet.
    /// Dropping the returned future part-way clears the loading flag.
    pub async fn upload(&self, path: &Path) -> Result<UploadSummary> {
        self.store.write().await.begin_upload()?;
        let in_flight = LoadingGuard::new(self.store.clone());
        tracing::info!(file = %path.display(), "upload started");

        let outcome = self.read_and_parse(path).await;
        let summary = self.store.write().await.complete_upload(outcome);
        in_flight.disarm();
        summary
    }

    async fn read_and_parse(&self, path: &Path) -> Result<ParsedWorkbook> {
        let format = SourceFormat::from_path(path)?;
        let name = file_stem(path);
        let bytes = tokio::fs::read(path).await.map_err(ParseError::Io)?;
        let parser = self.parser.clone();

        tokio::task::spawn_blocking(move || -> Result<ParsedWorkbook> {
            let workbook = WorkbookReader::new().read_bytes(&bytes, format, &name)?;
            Ok(parser.parse_with_report(&workbook))
        })
        .await?
    }
}

/// Clears the loading flag if an upload is dropped before `complete_upload` runs
struct LoadingGuard {
    store: Option<SharedStore>,
}

impl LoadingGuard {
    fn new(store: SharedStore) -> Self {
        Self { store: Some(store) }
    }

    fn disarm(mut self) {
        self.store = None;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let Some(store) = self.store.take() else {
            return;
        };
        tracing::warn!("upload cancelled before completion");

        let cleared = match store.try_write() {
            Ok(mut guard) => {
                guard.set_loading(false);
                true
            }
            Err(_) => false,
        };

        // Lock held elsewhere: release the flag once it frees up
        if !cleared {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    store.write().await.set_loading(false);
                });
            }
        }
    }
}
