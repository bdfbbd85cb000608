mod coordinator;
mod coordinator_command;
mod coordinator_handle;
mod directory;

pub use coordinator::*;
pub use coordinator_command::*;
pub use coordinator_handle::*;
pub(crate) use directory::Directory;
