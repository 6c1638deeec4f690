pub mod asset;
pub mod storage;

pub use asset::{AssetCategory, ModelFormat, NewAsset};
pub use storage::{AddressParseError, StorageAddress, StoredFile, LOCAL_MARKER};
