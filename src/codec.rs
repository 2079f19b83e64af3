//! # 图像编解码模块
//!
//! 连接文件字节与隐写核心：校验输入、解码为 RGBA 像素、调用
//! [`embed`]/[`extract`]，并将结果重新编码为无损的 PNG。
//! 输出始终是 PNG，有损格式会破坏嵌入的数据。

use crate::config::Limits;
use crate::error::StegError;
use crate::steganography::{Message, carrier_capacity, embed, extract, max_message_len};
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::io::Cursor;

/// 图像的隐写容量信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub width: u32,
    pub height: u32,
    /// 可用的载体比特数 (像素数 × 3)。
    pub bits: usize,
    /// 可隐藏的最大消息长度 (字节)。
    pub max_message_len: usize,
}

/// 校验输入字节：大小不超过上限且为可识别的图像格式。
pub fn validate_input(input: &[u8], limits: &Limits) -> Result<ImageFormat, StegError> {
    if input.len() > limits.max_input_bytes {
        return Err(StegError::InputTooLarge {
            size: input.len(),
            limit: limits.max_input_bytes,
        });
    }
    image::guess_format(input).map_err(|_| StegError::NotAnImage)
}

fn load_rgba(input: &[u8], limits: &Limits) -> Result<RgbaImage, StegError> {
    let format = validate_input(input, limits)?;
    let img = image::load_from_memory_with_format(input, format)
        .map_err(StegError::ImageDecode)?
        .to_rgba8();
    debug!(
        "decoded {:?} image {}x{} ({} carrier bits)",
        format,
        img.width(),
        img.height(),
        carrier_capacity(&img)
    );
    Ok(img)
}

/// 将消息隐藏到图像中，返回 PNG 编码的结果。
///
/// # Errors
///
/// 输入校验、图像解码、容量检查或 PNG 编码失败时返回对应的 [`StegError`]。
pub fn encode_image(input: &[u8], message: &[u8], limits: &Limits) -> Result<Vec<u8>, StegError> {
    let mut img = load_rgba(input, limits)?;
    embed(&mut img, message, limits.max_message_len)?;
    debug!("embedded {} message bytes", message.len());

    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(StegError::ImageEncode)?;
    Ok(output)
}

/// 从图像中恢复隐藏的消息。
///
/// 图像中没有隐藏信息时返回 [`StegError::SignatureNotFound`]。
pub fn decode_image(input: &[u8], limits: &Limits) -> Result<Message, StegError> {
    let img = load_rgba(input, limits)?;
    let message = extract(&img, limits.max_message_len)?;
    debug!("extracted {} message bytes", message.len());
    Ok(message)
}

/// 计算图像的隐写容量。
pub fn image_capacity(input: &[u8], limits: &Limits) -> Result<Capacity, StegError> {
    let img = load_rgba(input, limits)?;
    let bits = carrier_capacity(&img);
    Ok(Capacity {
        width: img.width(),
        height: img.height(),
        bits,
        max_message_len: max_message_len(bits),
    })
}
