//! Utility modules

pub mod error;
pub mod logging;

pub use error::{PortalError, Result};
pub use logging::init_logging;
