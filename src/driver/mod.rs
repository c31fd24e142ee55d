pub mod error;
pub mod traits;
pub mod web;

pub use error::DriverError;
pub use traits::{BrowserSession, Selector};
pub use web::{WebSession, WebSessionConfig};
