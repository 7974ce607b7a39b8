use crate::config::ShellConfig;
use crate::error::Result as ShResult;
use crate::services::VolumeService;
use crate::store::{FileCatalog, ObjectStore, VolumeStore};
use std::path::Path;
use std::sync::Arc;

/// 统一的命令接口
pub trait Command {
    type Args;
    type Output;

    /// 执行命令
    fn execute(&self, args: Self::Args) -> ShResult<Self::Output>;

    /// 验证命令参数（在访问对象存储之前）
    fn validate_args(&self, args: &Self::Args) -> ShResult<()> {
        // 默认实现：无验证
        let _ = args;
        Ok(())
    }
}

/// 命令执行上下文，提供共享资源
#[derive(Clone)]
pub struct CommandContext {
    pub config: ShellConfig,
    pub volume_service: VolumeService,
}

impl CommandContext {
    /// 加载配置并连接配置中指定的卷目录
    pub fn new(config_path: Option<&Path>) -> ShResult<Self> {
        let config = ShellConfig::load(config_path)?;
        let backend = Arc::new(FileCatalog::new(&config.catalog));
        Ok(Self::with_backend(config, backend))
    }

    /// 基于已构建的后端创建上下文
    pub fn with_backend(config: ShellConfig, backend: Arc<dyn VolumeStore>) -> Self {
        let store = ObjectStore::with_page_size(backend, config.page_size);
        CommandContext {
            config,
            volume_service: VolumeService::new(store),
        }
    }
}

/// list-volume 命令参数（命令行原始值）
#[derive(Debug, Clone, Default)]
pub struct ListVolumeArgs {
    pub uri: Option<String>,
    pub length: Option<String>,
    pub start: Option<String>,
    pub prefix: Option<String>,
    pub user: Option<String>,
    pub all: bool,
    pub verbose: bool,
}
