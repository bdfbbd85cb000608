mod config;
mod coordinator;
mod error;
mod signaling;
mod transport;

pub use config::*;
pub use coordinator::*;
pub use error::*;
pub use signaling::*;
pub use transport::*;
