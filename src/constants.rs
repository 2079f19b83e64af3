/// 嵌入数据帧开头的魔数签名 (8 个 ASCII 字节)。
/// 解码时先比对签名，不匹配即视为图像中没有隐藏信息。
pub const SIGNATURE: &[u8; 8] = b"XNK_STEG";

/// 签名占用的比特数。
pub const SIGNATURE_BITS: usize = SIGNATURE.len() * 8;

/// 长度字段 (大端 `u32`) 占用的比特数。
pub const LENGTH_BITS: usize = 32;

/// 帧头 (签名 + 长度) 的总比特数。
pub const HEADER_BITS: usize = SIGNATURE_BITS + LENGTH_BITS;

/// RGBA 像素缓冲区中每个像素的字节数。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 每个像素可用于隐写的通道数 (R, G, B)，Alpha 通道始终跳过。
pub const CARRIER_CHANNELS_PER_PIXEL: usize = 3;

/// 默认的消息长度上限 (字节)。
/// 解码时长度字段超出此范围即判定为无效，避免把随机数据当成巨大的分配请求。
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 1_000_000;

/// 默认的输入图像文件大小上限 (5 MiB)。
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
