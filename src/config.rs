//! # 配置模块
//!
//! 从 TOML 文件加载运行参数。文件中缺失的键使用默认值。

use crate::constants::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_MESSAGE_LEN};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 程序的完整配置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
}

/// 输入与消息的大小限制。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// 输入图像文件的最大字节数。
    pub max_input_bytes: usize,
    /// 可隐藏或恢复的消息的最大字节数。
    pub max_message_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

/// 加载配置。未提供路径时返回默认配置。
///
/// # Errors
///
/// 配置文件无法读取或不是合法的 TOML 时返回错误。
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Unable to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    log::debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
