//! 同步原语
//!
//! 为文件系统各模块提供可在中断上下文安全使用的自旋锁。
//!
//! - [`IntrGuard`] - 关闭本地中断的 RAII 保护器
//! - [`RawSpinLock`] - 实现 [`lock_api::RawMutex`] 的裸自旋锁
//! - [`SpinLock`] - 基于 `lock_api` 的数据自旋锁
//!
//! # 架构依赖
//!
//! 中断控制通过 [`ArchOps`] trait 抽象。
//! 使用任何锁之前必须调用 [`register_arch_ops`] 注册实现。

#![no_std]

mod intr_guard;
mod raw_spin_lock;
mod spin_lock;

pub use intr_guard::IntrGuard;
pub use raw_spin_lock::RawSpinLock;
pub use spin_lock::{SpinLock, SpinLockGuard};

use core::sync::atomic::{AtomicPtr, Ordering};

/// 架构相关操作的 trait
///
/// 由内核（或测试桩）实现并注册，提供中断控制和 CPU 信息。
pub trait ArchOps: Send + Sync {
    /// 读取并禁用中断，返回之前的状态
    ///
    /// # Safety
    /// 调用者必须保证随后用同一个返回值调用 [`ArchOps::restore_interrupts`]
    unsafe fn read_and_disable_interrupts(&self) -> usize;

    /// 恢复中断状态
    ///
    /// # Safety
    /// flags 必须是之前 read_and_disable_interrupts 返回的值
    unsafe fn restore_interrupts(&self, flags: usize);

    /// 中断使能位掩码
    fn sstatus_sie(&self) -> usize;

    /// 当前 CPU ID
    fn cpu_id(&self) -> usize;

    /// 最大 CPU 数量
    fn max_cpu_count(&self) -> usize;
}

/// 已注册的实现
///
/// `&'static dyn ArchOps` 是胖指针，无法直接放进原子变量，
/// 这里保存的是指向它的瘦指针，注册时把引用本身泄漏到静态存储中。
static ARCH_OPS: AtomicPtr<&'static dyn ArchOps> = AtomicPtr::new(core::ptr::null_mut());

/// 注册架构操作实现
///
/// 重复注册时后一次覆盖前一次；已经持有锁的调用者会用新实现恢复中断。
///
/// # Safety
/// 必须在任何锁被使用之前、在单线程环境下调用
pub unsafe fn register_arch_ops(ops: &'static &'static dyn ArchOps) {
    let ptr = ops as *const &'static dyn ArchOps as *mut &'static dyn ArchOps;
    ARCH_OPS.store(ptr, Ordering::Release);
}

/// 是否已经注册了架构操作
pub fn arch_ops_registered() -> bool {
    !ARCH_OPS.load(Ordering::Acquire).is_null()
}

/// 获取架构操作实例
///
/// # Panics
/// 尚未调用 [`register_arch_ops`] 时 panic
#[inline]
pub(crate) fn arch_ops() -> &'static dyn ArchOps {
    let ptr = ARCH_OPS.load(Ordering::Acquire);
    if ptr.is_null() {
        panic!("sync: ArchOps not registered, call register_arch_ops first");
    }
    // SAFETY: ptr 来自 register_arch_ops 传入的 'static 引用
    unsafe { *ptr }
}

#[cfg(test)]
pub(crate) mod test_arch {
    //! 单元测试用的架构桩：每个线程独立维护一份“中断使能”状态。

    extern crate std;

    use super::ArchOps;
    use core::cell::Cell;
    use std::sync::Once;

    std::thread_local! {
        static ENABLED: Cell<bool> = const { Cell::new(true) };
    }

    pub(crate) struct ThreadLocalArch;

    impl ArchOps for ThreadLocalArch {
        unsafe fn read_and_disable_interrupts(&self) -> usize {
            ENABLED.with(|e| e.replace(false)) as usize
        }

        unsafe fn restore_interrupts(&self, flags: usize) {
            ENABLED.with(|e| e.set(flags != 0));
        }

        fn sstatus_sie(&self) -> usize {
            1
        }

        fn cpu_id(&self) -> usize {
            0
        }

        fn max_cpu_count(&self) -> usize {
            1
        }
    }

    static ARCH: ThreadLocalArch = ThreadLocalArch;
    static ARCH_REF: &dyn ArchOps = &ARCH;
    static INIT: Once = Once::new();

    pub(crate) fn init() {
        // SAFETY: Once 保证只注册一次
        INIT.call_once(|| unsafe { super::register_arch_ops(&ARCH_REF) });
    }

    pub(crate) fn interrupts_enabled() -> bool {
        ENABLED.with(|e| e.get())
    }
}
