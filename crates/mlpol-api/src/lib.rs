pub mod builders;
pub mod config;
pub mod policies;
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use builders::policies::PolicyBuilder;
pub use config::{DeviceConfig, PolicyConfig, PolicyType};
pub use policies::PolicyKind;
