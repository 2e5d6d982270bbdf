//! 设备注册表错误类型
//!
//! 查找未命中不是错误，用 `None` 表示；这里只覆盖创建失败。
//! 可通过 [`DevError::to_errno()`] 转换为系统调用错误码。

use core::fmt;

/// 创建设备条目失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevError {
    /// 条目数达到上限 (-ENOSPC)
    NoSpace,
    /// inode 号已经映射到另一个 Oid (-EEXIST)
    InodeInUse,
}

impl DevError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            DevError::InodeInUse => -17,
            DevError::NoSpace => -28,
        }
    }
}

impl fmt::Display for DevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevError::NoSpace => f.write_str("device registry is full"),
            DevError::InodeInUse => f.write_str("inode already mapped to another device"),
        }
    }
}

impl core::error::Error for DevError {}
