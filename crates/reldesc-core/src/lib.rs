pub mod config;
pub mod error;
pub mod logging;

pub mod builder;
pub mod changelog;
pub mod checksum;
pub mod descriptor;
pub mod fetch_head;
pub mod github;
pub mod http;
pub mod mirror;

pub use builder::ReleaseDescriptorBuilder;
pub use error::ReleaseError;
