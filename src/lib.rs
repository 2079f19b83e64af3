//! # xnk_steg 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：像素级编解码器、图像读写层以及命令行处理。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use error::StegError;
