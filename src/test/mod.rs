//! Test utilities: mock API clients for exercising the pipeline without AWS.


pub use mocks::{MockCloudWatchClient, MockKinesisClient};
