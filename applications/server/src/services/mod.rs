/// Server services
pub mod catalog;
pub mod object_storage;
pub mod remote_media;

pub use catalog::CatalogService;
pub use object_storage::{Bucket, ObjectStorage, SONGS_BUCKET};
pub use remote_media::RemoteMedia;
