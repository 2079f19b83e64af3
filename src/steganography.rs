//! # 隐写核心算法模块
//!
//! 在 RGBA 像素缓冲区的 R、G、B 通道最低有效位中读写数据帧：
//!
//! ```text
//! [8 字节 ] 签名 "XNK_STEG"
//! [4 字节 ] 消息长度 (大端 u32)
//! [N 字节 ] 消息内容
//! ```
//!
//! 每个字节按最高位优先写入。Alpha 通道 (缓冲区下标满足 `(i + 1) % 4 == 0`)
//! 始终跳过，嵌入与提取共用同一个载体下标映射 [`carrier_index`]。

use crate::constants::{
    CARRIER_CHANNELS_PER_PIXEL, CHANNELS_PER_PIXEL, HEADER_BITS, LENGTH_BITS, SIGNATURE,
    SIGNATURE_BITS,
};
use crate::error::StegError;

/// 从图像中恢复出的消息字节。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(Vec<u8>);

impl Message {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 将消息转换为文本。
    ///
    /// 合法的 UTF-8 按原样解码；否则每个字节映射为同码位的字符 (Latin-1)，
    /// 以兼容逐字符写入单字节的旧数据。
    ///
    /// 两种解释存在歧义：恰好也是合法 UTF-8 的 Latin-1 数据 (例如 `[0xC3, 0xA9]`，
    /// 按 Latin-1 是 "Ã©") 会被解码为 UTF-8 的 "é"。需要逐字节解释时请使用 [`Message::as_bytes`]。
    pub fn to_text(&self) -> String {
        match std::str::from_utf8(&self.0) {
            Ok(text) => text.to_owned(),
            Err(_) => self.0.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// 第 `bit` 个载体比特在像素缓冲区中的下标。
#[inline]
pub fn carrier_index(bit: usize) -> usize {
    bit / CARRIER_CHANNELS_PER_PIXEL * CHANNELS_PER_PIXEL + bit % CARRIER_CHANNELS_PER_PIXEL
}

/// 缓冲区中可用于隐写的比特数 (非 Alpha 通道的数量)。
pub fn carrier_capacity(pix: &[u8]) -> usize {
    let full = pix.len() / CHANNELS_PER_PIXEL * CARRIER_CHANNELS_PER_PIXEL;
    full + (pix.len() % CHANNELS_PER_PIXEL).min(CARRIER_CHANNELS_PER_PIXEL)
}

/// 给定载体比特数时，能够容纳的最大消息长度 (字节)。
pub fn max_message_len(capacity_bits: usize) -> usize {
    capacity_bits.saturating_sub(HEADER_BITS) / 8
}

/// 长度为 `len` 字节的消息所需的数据帧比特数。
pub fn frame_bits(len: usize) -> usize {
    HEADER_BITS + len * 8
}

fn check_region(pix: &[u8], start: usize, size: usize) -> Result<(), StegError> {
    let available = carrier_capacity(pix);
    match start.checked_add(size) {
        Some(end) if end <= available => Ok(()),
        end => Err(StegError::OutOfBounds {
            start,
            end: end.unwrap_or(usize::MAX),
            available,
        }),
    }
}

/// 将 `value` 的低 `size` 位按最高位优先写入从第 `start` 个载体比特开始的区域。
pub fn modify(value: u64, pix: &mut [u8], start: usize, size: usize) -> Result<(), StegError> {
    debug_assert!(size <= 64);
    check_region(pix, start, size)?;

    for i in 0..size {
        let bit = ((value >> (size - 1 - i)) & 1) as u8;
        let byte = &mut pix[carrier_index(start + i)];
        *byte = (*byte & 0xFE) | bit;
    }

    Ok(())
}

/// 从第 `start` 个载体比特开始读取 `size` 位，按最高位优先组装为整数。
pub fn recover(pix: &[u8], start: usize, size: usize) -> Result<u64, StegError> {
    debug_assert!(size <= 64);
    check_region(pix, start, size)?;

    Ok((0..size).fold(0u64, |acc, i| {
        (acc << 1) | u64::from(pix[carrier_index(start + i)] & 1)
    }))
}

fn read_bytes(pix: &[u8], start: usize, count: usize) -> Result<Vec<u8>, StegError> {
    (0..count)
        .map(|i| recover(pix, start + i * 8, 8).map(|v| v as u8))
        .collect()
}

/// 构造完整的数据帧：签名 + 长度 + 消息。
pub fn build_frame(message: &[u8]) -> Result<Vec<u8>, StegError> {
    let len = u32::try_from(message.len()).map_err(|_| StegError::MessageTooLong {
        len: message.len(),
        limit: u32::MAX as usize,
    })?;

    let mut frame = Vec::with_capacity(SIGNATURE.len() + 4 + message.len());
    frame.extend_from_slice(SIGNATURE);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(message);
    Ok(frame)
}

/// 将消息嵌入像素缓冲区。
///
/// 容量不足时返回 [`StegError::InsufficientCapacity`]，并且不会修改缓冲区。
///
/// # Errors
///
/// * [`StegError::EmptyMessage`] - 消息为空。
/// * [`StegError::MessageTooLong`] - 消息超过 `max_len`。
/// * [`StegError::InsufficientCapacity`] - 图像容量不足。
pub fn embed(pix: &mut [u8], message: &[u8], max_len: usize) -> Result<(), StegError> {
    if message.is_empty() {
        return Err(StegError::EmptyMessage);
    }
    if message.len() > max_len {
        return Err(StegError::MessageTooLong {
            len: message.len(),
            limit: max_len,
        });
    }

    let available_bits = carrier_capacity(pix);
    let required_bits = frame_bits(message.len());
    if required_bits > available_bits {
        return Err(StegError::InsufficientCapacity {
            required_bits,
            available_bits,
            max_len: max_message_len(available_bits),
        });
    }

    let frame = build_frame(message)?;
    frame
        .iter()
        .enumerate()
        .try_for_each(|(i, &byte)| modify(u64::from(byte), pix, i * 8, 8))
}

/// 从像素缓冲区中提取消息。
///
/// # Errors
///
/// * [`StegError::SignatureNotFound`] - 签名不匹配，图像中没有隐藏信息。
/// * [`StegError::InvalidLength`] - 长度字段为 0 或超过 `max_len`。
/// * [`StegError::Truncated`] - 图像剩余容量不足以容纳声明的长度。
pub fn extract(pix: &[u8], max_len: usize) -> Result<Message, StegError> {
    let available_bits = carrier_capacity(pix);
    if available_bits < SIGNATURE_BITS {
        return Err(StegError::SignatureNotFound);
    }

    let signature = read_bytes(pix, 0, SIGNATURE.len())?;
    if signature != SIGNATURE {
        return Err(StegError::SignatureNotFound);
    }

    if available_bits < HEADER_BITS {
        return Err(StegError::Truncated {
            needed_bits: LENGTH_BITS,
            available_bits: available_bits - SIGNATURE_BITS,
        });
    }

    let len = recover(pix, SIGNATURE_BITS, LENGTH_BITS)? as u32;
    if len == 0 || len as usize > max_len {
        return Err(StegError::InvalidLength(len));
    }

    let needed_bits = len as usize * 8;
    let remaining = available_bits - HEADER_BITS;
    if needed_bits > remaining {
        return Err(StegError::Truncated {
            needed_bits,
            available_bits: remaining,
        });
    }

    read_bytes(pix, HEADER_BITS, len as usize).map(Message)
}
