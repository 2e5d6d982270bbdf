//! 旧式设备号兼容接口
//!
//! 本移植用 [`Oid`](crate::Oid) 而不是编码后的 major/minor 标识设备，
//! 这些函数只为沿用 encode/decode 约定的调用方保留，值原样透传。

/// 设备号
pub type DevT = u32;

/// 旧式（16 位）设备号是否有效，本移植中恒为 false
#[inline]
pub const fn old_valid_dev(_dev: DevT) -> bool {
    false
}

/// 编码为旧式设备号
#[inline]
pub const fn old_encode_dev(dev: DevT) -> u32 {
    dev
}

/// 编码为新式设备号
#[inline]
pub const fn new_encode_dev(dev: DevT) -> u32 {
    dev
}

/// 从旧式 16 位表示解码
#[inline]
pub const fn old_decode_dev(dev: u16) -> DevT {
    dev as DevT
}

/// 从新式 32 位表示解码
#[inline]
pub const fn new_decode_dev(dev: u32) -> DevT {
    dev
}
