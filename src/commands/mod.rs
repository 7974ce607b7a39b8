pub mod traits;

// 命令模块
pub mod list_volume;
pub mod request;

// 重新导出主要类型
pub use list_volume::ListVolumeCommand;
pub use request::ListRequest;
pub use traits::{Command, CommandContext};
