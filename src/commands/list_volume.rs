use crate::commands::request::{ListRequest, process_user};
use crate::commands::traits::{Command, CommandContext, ListVolumeArgs};
use crate::error::Result as ShResult;
use crate::store::VolumeInfo;
use std::io;

/// list-volume 命令实现
pub struct ListVolumeCommand {
    context: CommandContext,
}

impl ListVolumeCommand {
    pub fn new(context: CommandContext) -> Self {
        ListVolumeCommand { context }
    }

    fn build_request(&self, args: &ListVolumeArgs) -> ShResult<ListRequest> {
        let whoami = process_user();
        ListRequest::from_args(
            args,
            self.context.config.default_user.as_deref(),
            whoami.as_deref(),
        )
    }

    /// 解析参数并列出卷，不输出任何内容
    pub fn list(&self, args: &ListVolumeArgs) -> ShResult<(ListRequest, Vec<VolumeInfo>)> {
        let request = self.build_request(args)?;
        let volumes = self.context.volume_service.list_volumes(&request)?;
        Ok((request, volumes))
    }
}

impl Command for ListVolumeCommand {
    type Args = ListVolumeArgs;
    type Output = Vec<VolumeInfo>;

    fn execute(&self, args: Self::Args) -> ShResult<Self::Output> {
        let (request, volumes) = self.list(&args)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.context
            .volume_service
            .render(&request, &volumes, &mut out)?;

        Ok(volumes)
    }

    fn validate_args(&self, args: &Self::Args) -> ShResult<()> {
        self.build_request(args).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use crate::store::testing::{RecordingStore, volume};
    use std::sync::Arc;

    fn command(backend: Arc<RecordingStore>, default_user: Option<&str>) -> ListVolumeCommand {
        let config = ShellConfig {
            default_user: default_user.map(str::to_string),
            ..ShellConfig::default()
        };
        ListVolumeCommand::new(CommandContext::with_backend(config, backend))
    }

    #[test]
    fn invalid_length_fails_before_provider_is_touched() {
        for length in ["-5", "abc"] {
            let backend = Arc::new(RecordingStore::with_names("alice", &["vol-a"]));
            let cmd = command(backend.clone(), None);
            let args = ListVolumeArgs {
                length: Some(length.to_string()),
                ..ListVolumeArgs::default()
            };

            assert!(cmd.validate_args(&args).unwrap_err().is_invalid_argument());
            assert!(cmd.list(&args).unwrap_err().is_invalid_argument());
            assert!(backend.queries().is_empty());
        }
    }

    #[test]
    fn explicit_user_uses_owner_entry_point() {
        let backend = Arc::new(RecordingStore::new(vec![
            volume("vol-a", "alice"),
            volume("vol-b", "bob"),
        ]));
        let cmd = command(backend.clone(), Some("bob"));
        let args = ListVolumeArgs {
            user: Some("alice".to_string()),
            ..ListVolumeArgs::default()
        };

        let (request, volumes) = cmd.list(&args).unwrap();

        assert_eq!(request.scope.owner_name(), Some("alice"));
        assert_eq!(volumes.len(), 1);
        assert_eq!(backend.entry_points(), vec!["by_user:alice"]);
    }

    #[test]
    fn config_default_user_is_used_without_flag() {
        let backend = Arc::new(RecordingStore::new(vec![
            volume("vol-a", "alice"),
            volume("vol-b", "bob"),
        ]));
        let cmd = command(backend.clone(), Some("bob"));

        let (_, volumes) = cmd.list(&ListVolumeArgs::default()).unwrap();

        assert_eq!(volumes[0].name(), "vol-b");
        assert_eq!(backend.entry_points(), vec!["by_user:bob"]);
    }

    #[test]
    fn all_flag_uses_global_entry_point() {
        let backend = Arc::new(RecordingStore::new(vec![
            volume("vol-a", "alice"),
            volume("vol-b", "bob"),
        ]));
        let cmd = command(backend.clone(), Some("bob"));
        let args = ListVolumeArgs {
            all: true,
            length: Some("1".to_string()),
            ..ListVolumeArgs::default()
        };

        let (_, volumes) = cmd.list(&args).unwrap();

        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].name(), "vol-a");
        assert_eq!(backend.entry_points(), vec!["global"]);
    }

    #[test]
    fn invalid_uri_is_rejected_by_validation() {
        let backend = Arc::new(RecordingStore::with_names("alice", &[]));
        let cmd = command(backend.clone(), None);
        let args = ListVolumeArgs {
            uri: Some("/vol1/bucket".to_string()),
            ..ListVolumeArgs::default()
        };

        assert!(cmd.validate_args(&args).is_err());
        assert!(backend.queries().is_empty());
    }
}
