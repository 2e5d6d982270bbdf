//! 中断保护器
//!
//! 创建时关闭本地中断，销毁时恢复。
//!
//! 注意：关中断只能阻止本地 CPU 上“任务 vs 中断”的并发，
//! 其他 CPU 的并行访问仍需要自旋锁。

use crate::arch_ops;

/// 中断保护器，基于 RAII 实现中断保护。
///
/// # 示例
/// ```ignore
/// {
///     let guard = IntrGuard::new(); // 禁用中断
///     // 临界区代码
/// } // 离开作用域，自动恢复中断状态
/// ```
pub struct IntrGuard {
    flags: usize,
}

impl IntrGuard {
    /// 禁用中断并保存之前的状态。
    pub fn new() -> Self {
        // SAFETY: flags 由 Drop（或 from_flags 重建后的 Drop）原样恢复
        let flags = unsafe { arch_ops().read_and_disable_interrupts() };
        IntrGuard { flags }
    }

    /// 进入临界区前中断是否处于启用状态
    pub fn was_enabled(&self) -> bool {
        self.flags & arch_ops().sstatus_sie() != 0
    }

    /// 放弃保护器但不恢复中断，返回保存的状态。
    ///
    /// 用于锁的获取与释放不在同一个作用域的场景，
    /// 返回值必须稍后交给 [`IntrGuard::from_flags`]。
    pub fn into_flags(self) -> usize {
        let flags = self.flags;
        core::mem::forget(self);
        flags
    }

    /// 用 [`IntrGuard::into_flags`] 得到的状态重建保护器。
    ///
    /// # Safety
    /// flags 必须来自 into_flags，且只能使用一次
    pub unsafe fn from_flags(flags: usize) -> Self {
        IntrGuard { flags }
    }
}

impl Default for IntrGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntrGuard {
    fn drop(&mut self) {
        // SAFETY: flags 是创建时保存的值
        unsafe { arch_ops().restore_interrupts(self.flags) };
    }
}
