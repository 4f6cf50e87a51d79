//! Workspace-manifest resolution for project-tree folding.
//!
//! Parses a Go-style `go.work` manifest into a set of resolved member
//! directories and answers "which workspace module owns this file"
//! queries. All failure modes degrade to empty results rather than
//! errors: a missing or malformed manifest simply disables workspace
//! support.

mod fs;
mod index;
mod manifest;
mod resolve;

pub use fs::{FileSystem, OsFileSystem};
pub use index::{WorkspaceIndex, MANIFEST_FILE_NAME};
pub use manifest::parse_use_directives;
pub use resolve::{normalize, resolve_member};
