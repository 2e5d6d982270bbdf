//! # JFFS2 设备节点
//!
//! JFFS2 的设备特殊文件不保存编码后的设备号，设备由外部对象标识符 [`Oid`]
//! 指明。本 crate 维护 Oid 与文件系统内部 inode 号之间的内存映射，
//! 供打开、链接、删除设备节点的各条路径共享。
//!
//! - [`dev_registry`] - 双索引、带链接计数的设备注册表
//! - [`dev`] - 旧式设备号编解码的兼容函数（全部原样透传）
//! - [`config`] - 注册表配置
//! - [`error`] - 错误类型
//!
//! 注册表是纯内存缓存，挂载时创建、卸载时销毁，不做持久化。

#![no_std]

extern crate alloc;

pub mod config;
pub mod dev;
pub mod dev_registry;
pub mod error;
mod oid;

pub use config::DevRegistryConfig;
pub use dev::{DevT, new_decode_dev, new_encode_dev, old_decode_dev, old_encode_dev, old_valid_dev};
pub use dev_registry::{DevEntry, DevHandle, DevInfo, DevRegistry};
pub use error::DevError;
pub use oid::Oid;
