//! 设备节点注册表
//!
//! 维护设备特殊文件的 [`Oid`] 与 inode 号之间的双向映射。
//!
//! # 设计
//!
//! - 两个有序索引（按 Oid、按 inode 号）引用同一个 [`DevEntry`]，
//!   一个条目要么同时在两个索引中，要么都不在。
//! - 一把 [`SpinLock`] 保护两个索引，所有操作在整个执行期间持锁，
//!   因此并发的“查找或创建”只会创建一个条目。
//! - 查找返回 [`DevHandle`]（`Arc<DevEntry>`）。句柄只延长条目内存的生命周期，
//!   不影响索引成员关系：链接计数归零后条目立即从索引移除，
//!   已经拿到句柄的调用者仍可安全读取，并可通过 [`DevEntry::is_linked`] 发现它已失效。
//! - 只读取数值的调用者可以用 [`DevRegistry::info_oid`] / [`DevRegistry::info_ino`]
//!   直接拿到 [`DevInfo`] 快照。

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use log::{debug, trace};
use sync::SpinLock;

use crate::config::DevRegistryConfig;
use crate::error::DevError;
use crate::oid::Oid;

/// 设备条目句柄
pub type DevHandle = Arc<DevEntry>;

/// 设备条目
///
/// `oid` 与 `ino` 创建后不变；`nlink` 只在注册表锁内修改。
#[derive(Debug)]
pub struct DevEntry {
    oid: Oid,
    ino: u64,
    nlink: AtomicI32,
    linked: AtomicBool,
}

impl DevEntry {
    fn new(oid: Oid, ino: u64) -> Self {
        Self {
            oid,
            ino,
            nlink: AtomicI32::new(1),
            linked: AtomicBool::new(true),
        }
    }

    /// 对象标识符
    pub fn oid(&self) -> Oid {
        self.oid
    }

    /// inode 号
    pub fn ino(&self) -> u64 {
        self.ino
    }

    /// 链接计数
    ///
    /// 在锁外读取时只是某一时刻的值。
    pub fn nlink(&self) -> i32 {
        self.nlink.load(Ordering::Acquire)
    }

    /// 条目是否仍在注册表索引中
    pub fn is_linked(&self) -> bool {
        self.linked.load(Ordering::Acquire)
    }

    /// 取一份数值快照
    pub fn info(&self) -> DevInfo {
        DevInfo {
            oid: self.oid,
            ino: self.ino,
            nlink: self.nlink(),
        }
    }
}

/// 设备条目的数值快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevInfo {
    /// 对象标识符
    pub oid: Oid,
    /// inode 号
    pub ino: u64,
    /// 取快照时的链接计数
    pub nlink: i32,
}

/// 两个索引，始终成对修改
#[derive(Default)]
struct DevTables {
    by_oid: BTreeMap<Oid, DevHandle>,
    by_ino: BTreeMap<u64, DevHandle>,
}

impl DevTables {
    /// 链接计数已归零时把条目从两个索引中移除
    fn remove_if_unlinked(&mut self, oid: &Oid) -> bool {
        let Some(entry) = self.by_oid.get(oid) else {
            return false;
        };
        if entry.nlink.load(Ordering::Relaxed) > 0 {
            return false;
        }

        let ino = entry.ino;
        if let Some(entry) = self.by_oid.remove(oid) {
            self.by_ino.remove(&ino);
            entry.linked.store(false, Ordering::Release);
            trace!("jffs2: dev {} (ino {}) removed", oid, ino);
        }
        true
    }
}

/// 设备节点注册表
///
/// 由挂载上下文持有，挂载时创建，卸载时随之销毁。
pub struct DevRegistry {
    tables: SpinLock<DevTables>,
    config: DevRegistryConfig,
}

impl DevRegistry {
    /// 创建空注册表
    pub fn new(config: DevRegistryConfig) -> Self {
        Self {
            tables: SpinLock::new(DevTables::default()),
            config,
        }
    }

    /// 注册表配置
    pub fn config(&self) -> &DevRegistryConfig {
        &self.config
    }

    /// 按 Oid 查找，未命中且 `create` 为真时创建
    ///
    /// 命中时忽略 `ino` 和 `create`，原样返回已有条目。
    /// 创建失败（条目数达到上限，或 `ino` 已映射到其他 Oid）时返回 `None`，
    /// 两个索引都不会被修改。
    pub fn find_oid(&self, oid: &Oid, ino: u64, create: bool) -> Option<DevHandle> {
        if create {
            return self.try_find_oid(oid, ino).ok();
        }
        self.tables.lock().by_oid.get(oid).cloned()
    }

    /// 按 Oid 查找，未命中时创建，并报告创建失败的原因
    pub fn try_find_oid(&self, oid: &Oid, ino: u64) -> Result<DevHandle, DevError> {
        let mut tables = self.tables.lock();

        if let Some(entry) = tables.by_oid.get(oid) {
            return Ok(Arc::clone(entry));
        }

        if tables.by_ino.contains_key(&ino) {
            debug!("jffs2: dev {} refused, ino {} already mapped", oid, ino);
            return Err(DevError::InodeInUse);
        }
        if !self.config.has_room(tables.by_oid.len()) {
            debug!(
                "jffs2: dev {} refused, registry full ({} entries)",
                oid, self.config.max_entries
            );
            return Err(DevError::NoSpace);
        }

        let entry = Arc::new(DevEntry::new(*oid, ino));
        tables.by_ino.insert(ino, Arc::clone(&entry));
        tables.by_oid.insert(*oid, Arc::clone(&entry));
        trace!("jffs2: dev {} created as ino {}", oid, ino);
        Ok(entry)
    }

    /// 按 inode 号查找
    pub fn find_ino(&self, ino: u64) -> Option<DevHandle> {
        self.tables.lock().by_ino.get(&ino).cloned()
    }

    /// 按 Oid 取快照
    pub fn info_oid(&self, oid: &Oid) -> Option<DevInfo> {
        self.tables.lock().by_oid.get(oid).map(|e| e.info())
    }

    /// 按 inode 号取快照
    pub fn info_ino(&self, ino: u64) -> Option<DevInfo> {
        self.tables.lock().by_ino.get(&ino).map(|e| e.info())
    }

    /// 新增一个目录链接，未知 Oid 忽略
    pub fn inc(&self, oid: &Oid) {
        let tables = self.tables.lock();
        if let Some(entry) = tables.by_oid.get(oid) {
            entry.nlink.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// 移除一个目录链接，计数归零时从注册表删除，未知 Oid 忽略
    ///
    /// 递减和删除检查在同一个临界区内完成。
    pub fn dec(&self, oid: &Oid) {
        let mut tables = self.tables.lock();
        if let Some(entry) = tables.by_oid.get(oid) {
            entry.nlink.fetch_sub(1, Ordering::AcqRel);
        }
        tables.remove_if_unlinked(oid);
    }

    /// 链接计数不大于 0 时从两个索引中移除条目
    ///
    /// 计数仍为正时什么也不做。返回条目是否被移除。
    pub fn destroy(&self, oid: &Oid) -> bool {
        self.tables.lock().remove_if_unlinked(oid)
    }

    /// 按 Oid 判断是否存在
    pub fn contains_oid(&self, oid: &Oid) -> bool {
        self.tables.lock().by_oid.contains_key(oid)
    }

    /// 按 inode 号判断是否存在
    pub fn contains_ino(&self, ino: u64) -> bool {
        self.tables.lock().by_ino.contains_key(&ino)
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.tables.lock().by_oid.len()
    }

    /// 是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 卸载时清空注册表，返回移除的条目数
    pub fn clear(&self) -> usize {
        let mut tables = self.tables.lock();
        let old = core::mem::take(&mut *tables);
        drop(tables);

        let count = old.by_oid.len();
        for entry in old.by_oid.values() {
            entry.linked.store(false, Ordering::Release);
        }
        if count != 0 {
            trace!("jffs2: dev registry cleared, {} entries dropped", count);
        }
        count
    }
}

impl Default for DevRegistry {
    fn default() -> Self {
        Self::new(DevRegistryConfig::default())
    }
}

impl Drop for DevRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
