//! 设置持久化模块
//!
//! 设置以 JSON 文件保存，所有字段都有默认值；文件不存在时直接使用默认设置。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::image_loader::LoaderConfig;

/// 应用设置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// 图片加载配置。
    pub loader: LoaderConfig,
    /// 默认日志过滤规则（`RUST_LOG` 优先）。
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// 读取设置文件。
///
/// - 文件不存在：返回默认设置
/// - JSON 无法解析或配置越界：返回 `AppError::Settings`
pub fn load_settings(path: &Path) -> Result<Settings, AppError> {
    if !path.exists() {
        log::debug!("设置文件不存在，使用默认设置: {}", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)?;
    let parsed = serde_json::from_str::<Settings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    parsed
        .loader
        .validate()
        .map_err(|e| AppError::Settings(format!("设置取值无效: {}", e)))?;

    Ok(parsed)
}

/// 写入设置文件（格式化 JSON），自动创建父目录。
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Settings(format!("创建设置目录 '{}' 失败: {}", parent.display(), e))
            })?;
        }
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}
