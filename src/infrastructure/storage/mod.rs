mod object_artifact_store;
mod store_factory;

pub use object_artifact_store::ObjectArtifactStore;
pub use store_factory::ArtifactStoreFactory;
