mod config;
mod credential;
mod error;
mod item;
pub use config::{Config, ConfigBuilder};
pub use credential::Credential;
pub use error::{Error, Result};
pub use item::{DataItem, DataItemFactory, ItemFactory};
pub mod http;
pub mod swift;
pub mod task;
