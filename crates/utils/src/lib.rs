pub mod clock;
pub mod config;
pub mod errors;
pub mod logger;

pub use clock::*;
pub use config::EnvLoader;
pub use config::*;
pub use errors::*;
pub use logger::*;
