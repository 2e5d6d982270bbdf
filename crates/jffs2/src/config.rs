//! 注册表配置

/// 设备注册表配置，创建后只读
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DevRegistryConfig {
    /// 最大条目数（0 表示无限制）
    pub max_entries: usize,
}

impl DevRegistryConfig {
    /// 不限条目数的配置
    pub const fn new() -> Self {
        Self { max_entries: 0 }
    }

    /// 设置最大条目数，0 表示无限制
    pub const fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// 当前已有 `len` 个条目时能否再创建一个
    pub(crate) fn has_room(&self, len: usize) -> bool {
        self.max_entries == 0 || len < self.max_entries
    }
}
