pub mod network;
pub mod session;

pub use network::Network;
pub use session::{Change, Session};
