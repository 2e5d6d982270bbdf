//! 自旋锁实现
//!
//! 基于原子操作的自旋锁，结合 [`IntrGuard`] 在持锁期间关闭本地中断。
//! 通过实现 [`lock_api::RawMutex`]，由 `lock_api` 负责数据封装和 RAII 守卫。

use core::hint;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lock_api::{GuardNoSend, RawMutex};

use crate::intr_guard::IntrGuard;

/// 裸自旋锁，不可重入。
///
/// 获取锁时先关中断再自旋，保存的中断状态存放在锁内部，
/// 由释放锁的一方恢复。
#[derive(Debug)]
pub struct RawSpinLock {
    locked: AtomicBool,
    /// 持有者进入临界区前的中断状态，只有持有者读写
    saved_flags: AtomicUsize,
}

impl RawSpinLock {
    /// 创建一个未上锁的实例。
    pub const fn new() -> Self {
        RawSpinLock {
            locked: AtomicBool::new(false),
            saved_flags: AtomicUsize::new(0),
        }
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: 通过 Acquire/Release 的 CAS 保证同一时刻只有一个持有者
unsafe impl RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawSpinLock::new();

    // 保存的中断状态属于加锁的 CPU，守卫不能跨线程释放
    type GuardMarker = GuardNoSend;

    fn lock(&self) {
        let guard = IntrGuard::new();

        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }

        self.saved_flags
            .store(guard.into_flags(), Ordering::Relaxed);
    }

    fn try_lock(&self) -> bool {
        let guard = IntrGuard::new();

        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            self.saved_flags
                .store(guard.into_flags(), Ordering::Relaxed);
            true
        } else {
            // 失败时 guard 被 drop，立即恢复中断
            false
        }
    }

    unsafe fn unlock(&self) {
        let flags = self.saved_flags.load(Ordering::Relaxed);
        self.locked.store(false, Ordering::Release);
        // SAFETY: flags 是本次加锁时 into_flags 保存的值
        drop(unsafe { IntrGuard::from_flags(flags) });
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}
