//! 测试支持 crate
//!
//! 提供主机端 `cargo test` 所需的 Mock 实现

#![no_std]

pub mod mock;

pub use mock::arch::{MOCK_ARCH_OPS, init_arch_ops};
