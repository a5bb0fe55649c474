use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_artifact_store::ObjectArtifactStore;

pub struct ArtifactStoreFactory;

impl ArtifactStoreFactory {
    pub fn create(
        settings: &StorageSettings,
    ) -> Result<Arc<dyn ArtifactStore>, ArtifactStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                tracing::info!(path = %path.display(), "Using local artifact store");
                Ok(Arc::new(ObjectArtifactStore::local(path)?))
            }
            StorageProviderSetting::Memory => {
                tracing::info!("Using in-memory artifact store");
                Ok(Arc::new(ObjectArtifactStore::in_memory()))
            }
        }
    }
}
