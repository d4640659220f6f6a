//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `ImageSource` 表示图片定位符的来源语义
//! - `RawImageData` 表示已加载但未解析的字节

use std::fmt;

use super::LoadError;

/// 图片输入来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// 网络地址来源（http / https）。
    Url(String),
    /// Data URL（`data:image/...;base64,...`）。
    Base64(String),
    /// 本地文件路径来源。
    FilePath(String),
}

impl ImageSource {
    /// 从控件收到的图片定位符推断来源。
    ///
    /// # 示例
    /// ```
    /// use image_rect_selection::image_loader::ImageSource;
    ///
    /// let source = ImageSource::parse("https://example.com/a.png")?;
    /// assert!(matches!(source, ImageSource::Url(_)));
    /// # Ok::<(), image_rect_selection::image_loader::LoadError>(())
    /// ```
    pub fn parse(locator: &str) -> Result<Self, LoadError> {
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(LoadError::InvalidFormat("图片地址为空".to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("data:") {
            return Ok(Self::Base64(trimmed.to_string()));
        }
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Url(trimmed.to_string()));
        }
        if lower.starts_with("file://") {
            return Ok(Self::FilePath(trimmed["file://".len()..].to_string()));
        }

        Ok(Self::FilePath(trimmed.to_string()))
    }

    /// 来源提示（用于日志与诊断）。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Base64(_) => "base64",
            Self::FilePath(_) => "file",
        }
    }

    /// 缓存键；Data URL 可能很长，只取其长度与前缀。
    pub(crate) fn cache_key(&self) -> String {
        match self {
            Self::Url(url) => format!("url:{}", url),
            Self::FilePath(path) => format!("file:{}", path),
            Self::Base64(data) => {
                let prefix: String = data.chars().take(64).collect();
                format!("base64:{}:{}", data.len(), prefix)
            }
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::FilePath(path) => write!(f, "{}", path),
            Self::Base64(data) => write!(f, "<data url, {} bytes>", data.len()),
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}
