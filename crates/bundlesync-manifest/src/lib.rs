//! Library manifest synchronization
//!
//! After a front-end build, the emitted `*.js` and `*.css` bundles are
//! registered in the module's `<module>.libraries.yml` so the asset loader
//! picks them up. Hash suffixes are stripped from file names, which keeps the
//! manifest stable across rebuilds.
//!
//! The flow is discovery -> key derivation -> merge -> atomic write, driven
//! by [`LibrarySync`].

pub mod discovery;
pub mod errors;
pub mod manifest;
pub mod manifest_writer;
pub mod naming;
pub mod sync;
pub mod types;

pub use discovery::{discover_artifacts, Artifacts};
pub use errors::{SyncError, SyncErrorKind};
pub use manifest::ManifestDocument;
pub use manifest_writer::{read_from_path, write_to_path, PersistStatus};
pub use naming::{derive_asset_key, derive_asset_keys};
pub use sync::{LibrarySync, SyncOutcome, SyncPlan, SyncReport};
pub use types::{AssetOptions, AssetSection, LibraryDescriptor, StylesheetSection};
