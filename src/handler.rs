//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用图像编解码层以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::codec::{decode_image, encode_image, image_capacity};
use crate::config::Config;
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::error::StegError;
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 在输入文件旁生成带前缀的输出路径，例如 `photo.jpg` -> `doctored_photo.png`。
fn sibling_path(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    source.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 输出文件已存在且未指定 `--force` 时拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像与文本、检查隐写空间是否足够、调用编码层嵌入消息，
/// 最后将结果写入目标 PNG 文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`，或目标不是 `.png` 文件。
/// * 无法读取输入的图像或文本文件，或消息为空。
/// * 图像文件没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs, config: &Config) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| sibling_path(&args.image, DOCTORED_PREFIX, "png"));

    anyhow::ensure!(
        dest.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png")),
        "Output must be a PNG file to stay lossless: {}",
        dest.to_string_lossy().red().bold()
    );
    ensure_writable(&dest, args.force)?;

    let picture = read_image(&args.image)?;

    let text = match (&args.text, args.message) {
        (Some(path), _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.into_bytes(),
        (None, None) => anyhow::bail!("Either a text file or a message is required."),
    };

    anyhow::ensure!(!text.is_empty(), "Please provide a message to hide.");
    debug!(
        "hiding {} bytes in {} ({} bytes)",
        text.len(),
        args.image.display(),
        picture.len()
    );

    let stego = match encode_image(&picture, &text, &config.limits) {
        Err(StegError::InsufficientCapacity {
            required_bits,
            available_bits,
            max_len,
        }) => anyhow::bail!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits (max {} bytes)",
            required_bits.to_string().red().bold(),
            available_bits.to_string().green().bold(),
            max_len.to_string().green().bold()
        ),
        result => result.with_context(|| {
            format!(
                "Failed to hide the message in {}",
                args.image.to_string_lossy().red().bold()
            )
        })?,
    };

    fs::write(&dest, stego).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!("wrote {}", dest.display());
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用解码层恢复消息，并以 UTF-8 文本写入目标文件
/// (单字节的 Latin-1 数据会被转换为对应字符)。指定 `--raw` 时写入原始字节。
/// 图像中没有隐藏信息属于正常结果：只打印提示，不写文件，也不检查目标文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件，或图像中的数据已损坏。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs, config: &Config) -> Result<()> {
    let dest = args
        .text
        .unwrap_or_else(|| sibling_path(&args.image, RECOVERED_PREFIX, "txt"));

    let picture = read_image(&args.image)?;

    let message = match decode_image(&picture, &config.limits) {
        Err(e) if e.is_no_message() => {
            info!("no signature in {}", args.image.display());
            println!(
                "No hidden message found in {}",
                args.image.to_string_lossy().yellow().bold()
            );
            return Ok(());
        }
        result => result.with_context(|| {
            format!(
                "Failed to recover the message from '{}'. \nThe hidden data appears to be corrupted.",
                args.image.to_string_lossy().red().bold()
            )
        })?,
    };

    debug!("recovered {} bytes", message.len());
    ensure_writable(&dest, args.force)?;

    let contents = if args.raw {
        message.into_bytes()
    } else {
        message.to_text().into_bytes()
    };
    fs::write(&dest, contents).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：打印图像的载体比特数与可隐藏的最大消息长度。
pub fn handle_capacity(args: CapacityArgs, config: &Config) -> Result<()> {
    let picture = read_image(&args.image)?;
    let capacity = image_capacity(&picture, &config.limits).with_context(|| {
        format!(
            "Unable to inspect image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} ({}x{}): {} carrier bits, up to {} bytes",
        args.image.to_string_lossy().bold(),
        capacity.width,
        capacity.height,
        capacity.bits,
        capacity.max_message_len.to_string().green().bold()
    );
    Ok(())
}
