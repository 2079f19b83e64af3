//! # 错误类型模块
//!
//! [`StegError`] 覆盖了从输入校验、图像解码到隐写嵌入/提取的全部失败情形。
//! 编解码器从不 panic，所有失败都以 `Result<_, StegError>` 的形式返回给调用方。

use thiserror::Error;

/// 隐写编解码过程中可能出现的错误。
#[derive(Debug, Error)]
pub enum StegError {
    /// 输入文件超过配置的大小上限。
    #[error("input is {size} bytes, larger than the {limit} byte limit")]
    InputTooLarge { size: usize, limit: usize },

    /// 输入不是可识别的栅格图像格式。
    #[error("input is not a supported image format")]
    NotAnImage,

    /// 图像无法解码为像素数据。
    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// 隐写后的像素数据无法重新编码为 PNG。
    #[error("failed to encode PNG output: {0}")]
    ImageEncode(#[source] image::ImageError),

    /// 要隐藏的消息为空。
    #[error("message is empty")]
    EmptyMessage,

    /// 消息超过允许的最大长度。
    #[error("message is {len} bytes, longer than the {limit} byte limit")]
    MessageTooLong { len: usize, limit: usize },

    /// 图像容量不足以容纳完整的数据帧。
    #[error(
        "message too long: requires {required_bits} bits but the image holds {available_bits} (max {max_len} bytes)"
    )]
    InsufficientCapacity {
        required_bits: usize,
        available_bits: usize,
        max_len: usize,
    },

    /// 图像中没有找到签名，即不包含隐藏信息。
    #[error("no hidden message found (invalid signature)")]
    SignatureNotFound,

    /// 长度字段不在合理范围内。
    #[error("invalid message length detected: {0}")]
    InvalidLength(u32),

    /// 长度字段声明的数据超出了图像的实际容量。
    #[error("hidden message is truncated: needs {needed_bits} bits but only {available_bits} remain")]
    Truncated {
        needed_bits: usize,
        available_bits: usize,
    },

    /// 比特读写越过了像素缓冲区的末尾。
    #[error("bit region {start}..{end} extends beyond the {available} carrier bits of the image")]
    OutOfBounds {
        start: usize,
        end: usize,
        available: usize,
    },
}

impl StegError {
    /// 是否为“图像中没有隐藏信息”这一正常的否定结果。
    pub fn is_no_message(&self) -> bool {
        matches!(self, Self::SignatureNotFound)
    }
}
