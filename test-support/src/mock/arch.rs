//! 架构相关操作的 Mock 实现
//!
//! 中断状态是全局的一份，多线程测试下只用于统计调用次数，
//! 不要在并发测试里断言具体的中断状态。

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sync::ArchOps;

/// Mock 架构操作
pub struct MockArchOps {
    interrupt_state: AtomicBool,
    disable_calls: AtomicUsize,
    restore_calls: AtomicUsize,
}

impl MockArchOps {
    /// 创建中断处于开启状态的实例
    pub const fn new() -> Self {
        Self {
            interrupt_state: AtomicBool::new(true),
            disable_calls: AtomicUsize::new(0),
            restore_calls: AtomicUsize::new(0),
        }
    }

    /// 累计关中断次数
    pub fn disable_calls(&self) -> usize {
        self.disable_calls.load(Ordering::Relaxed)
    }

    /// 累计恢复中断次数
    pub fn restore_calls(&self) -> usize {
        self.restore_calls.load(Ordering::Relaxed)
    }
}

impl Default for MockArchOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchOps for MockArchOps {
    unsafe fn read_and_disable_interrupts(&self) -> usize {
        self.disable_calls.fetch_add(1, Ordering::Relaxed);
        self.interrupt_state.swap(false, Ordering::SeqCst) as usize
    }

    unsafe fn restore_interrupts(&self, flags: usize) {
        self.restore_calls.fetch_add(1, Ordering::Relaxed);
        self.interrupt_state.store(flags != 0, Ordering::SeqCst);
    }

    fn sstatus_sie(&self) -> usize {
        0x2 // SIE bit
    }

    fn cpu_id(&self) -> usize {
        0
    }

    fn max_cpu_count(&self) -> usize {
        1
    }
}

/// 全局 Mock 实例
pub static MOCK_ARCH_OPS: MockArchOps = MockArchOps::new();

static MOCK_ARCH_REF: &dyn ArchOps = &MOCK_ARCH_OPS;

// 0 = uninit, 1 = initializing, 2 = ready
static SYNC_INIT: AtomicUsize = AtomicUsize::new(0);

/// 把 [`MOCK_ARCH_OPS`] 注册给 sync crate，可以被多个测试重复调用
pub fn init_arch_ops() {
    match SYNC_INIT.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            // Safety: 整个测试进程只注册这一个全局实例
            unsafe { sync::register_arch_ops(&MOCK_ARCH_REF) };
            SYNC_INIT.store(2, Ordering::Release);
        }
        Err(_) => {
            while SYNC_INIT.load(Ordering::Acquire) != 2 {
                core::hint::spin_loop();
            }
        }
    }
}
