mod sleep_provider;
mod tokio;

pub use self::sleep_provider::*;
pub use self::tokio::*;
