pub mod connector;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod provider;
pub mod rpc;
