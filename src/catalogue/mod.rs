//! Request catalogue
//!
//! The named, ordered set of example requests. The built-in catalogue covers
//! every endpoint of the project-management API and is compiled into the
//! binary; `--catalogue` swaps in an external file with the same format.

pub mod descriptor;
pub mod loader;

pub use descriptor::{Method, RequestBody, RequestDescriptor, MULTIPART_SENTINEL};
pub use loader::{format_catalogue_list, Catalogue, Duplicate, StemCollision};
