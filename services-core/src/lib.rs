// Mockall triggers this warning for every mocked trait. This is fixed in Mockall master but not
// released.
#![cfg_attr(test, allow(clippy::unused_unit))]

pub mod http;
pub mod inputs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod oracle;
pub mod price_estimation;
pub mod savings;
pub mod scenario;
pub mod transport;
pub mod util;
