//! 对象标识符

use core::fmt;

/// 外部对象标识符：服务端口加端口内的对象 id。
///
/// 排序先比较 `port` 再比较 `id`，注册表的 Oid 索引依赖这一顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Oid {
    /// 服务端口
    pub port: u32,
    /// 端口内的对象 id
    pub id: u64,
}

impl Oid {
    /// 创建对象标识符
    pub const fn new(port: u32, id: u64) -> Self {
        Self { port, id }
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.port, self.id)
    }
}
