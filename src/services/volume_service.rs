use crate::commands::ListRequest;
use crate::error::Result as ShResult;
use crate::lister::BoundedLister;
use crate::store::{ObjectStore, VolumeInfo};
use console::{Color, style};
use rust_i18n::t;
use std::io::Write;

/// 卷服务，封装卷列表的查询与输出
#[derive(Clone)]
pub struct VolumeService {
    store: ObjectStore,
}

impl VolumeService {
    pub fn new(store: ObjectStore) -> Self {
        VolumeService { store }
    }

    /// 列出符合请求的卷，最多返回 `request.max_results` 个
    pub fn list_volumes(&self, request: &ListRequest) -> ShResult<Vec<VolumeInfo>> {
        let lister = BoundedLister::new(request.max_results)?;

        log::debug!(
            "listing volumes on {} for {} (prefix={:?}, start_after={:?})",
            request.endpoint,
            request.scope,
            request.prefix,
            request.start_after
        );

        let mut source = self
            .store
            .volumes(
                &request.scope,
                request.prefix.as_deref(),
                request.start_after.as_deref(),
            )
            .limit(request.max_results);

        // 达到上限后不再向后端请求
        let volumes = lister.list(&mut source)?;
        log::debug!(
            "listed {} volume(s) in {} page(s)",
            volumes.len(),
            source.pages_fetched()
        );
        Ok(volumes)
    }

    /// 以格式化 JSON 输出列表，verbose 模式下先输出汇总信息
    pub fn render<W: Write>(
        &self,
        request: &ListRequest,
        volumes: &[VolumeInfo],
        out: &mut W,
    ) -> ShResult<()> {
        if request.verbose {
            let summary = t!(
                "list_found_summary",
                count = volumes.len(),
                user = request.scope
            );
            writeln!(out, "{}", style(summary).fg(Color::Cyan))?;
        }

        serde_json::to_writer_pretty(&mut *out, volumes)?;
        writeln!(out)?;
        Ok(())
    }
}
