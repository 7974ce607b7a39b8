pub mod commands;
pub mod config;
pub mod error;
pub mod i18n;
pub mod lister;
pub mod services;
pub mod store;

rust_i18n::i18n!("locales");

pub use commands::CommandContext;
pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use lister::BoundedLister;
pub use services::VolumeService;
pub use store::{ObjectStore, VolumeInfo, VolumeStore};
