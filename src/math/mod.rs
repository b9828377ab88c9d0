pub mod init;
pub mod normalize;

pub use normalize::normalize;
