//! Model source adapters.

mod directory;
mod file;
mod memory;

pub use directory::DirectoryModelSource;
pub use file::FileModelSource;
pub use memory::InMemorySource;
