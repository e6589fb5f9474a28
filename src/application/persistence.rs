//! Cache-less document access for the admin surface.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{error, info};

use crate::{
    domain::documents::Document,
    infra::store::{DocumentStore, StorageInfo, StoreError},
};

use super::{
    content::{Loaded, defaulted, encode},
    decode,
};

const SOURCE: &str = "application::persistence::PersistentDataManager";

/// Reads and writes whole documents straight through to the store.
///
/// Callers that also serve reads from a [`ContentService`](super::content::ContentService)
/// must clear its cache after a successful save.
#[derive(Clone)]
pub struct PersistentDataManager {
    store: Arc<dyn DocumentStore>,
}

impl PersistentDataManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn load_data<T>(&self, document: Document, default: T) -> Loaded<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let value = match self.store.read(document).await {
            Ok(value) => value,
            Err(err) => return defaulted(SOURCE, document, default, err.into()),
        };

        match decode::record(document, &value, &default) {
            Ok(data) => {
                info!(document = %document, "Document loaded from store");
                Loaded::Fresh(data)
            }
            Err(cause) => defaulted(SOURCE, document, default, cause),
        }
    }

    pub async fn save_data<T: Serialize + ?Sized>(
        &self,
        document: Document,
        data: &T,
    ) -> Result<(), StoreError> {
        let result = match encode(document, data) {
            Ok(value) => self.store.write(document, &value).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(()) => info!(document = %document, "Document saved to store"),
            Err(err) => error!(
                target_module = SOURCE,
                document = %document,
                error = %err,
                "Failed to save document"
            ),
        }
        result
    }

    pub fn storage_info(&self) -> StorageInfo {
        self.store.storage_info()
    }
}
