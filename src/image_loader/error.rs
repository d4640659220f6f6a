//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图片加载链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。

/// 图片加载统一错误类型。
///
/// 控件层只记录日志、不向外传播；CLI 与设置层会上转为 `AppError`。
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("网络错误：{0}")]
    Network(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("超时错误：{0}")]
    Timeout(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl LoadError {
    /// 稳定的错误码，供日志与 CLI 输出使用。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::InvalidFormat(_) => "invalid_format",
            Self::FileSystem(_) => "file_system",
            Self::Timeout(_) => "timeout",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }
}
