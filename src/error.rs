//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，承接加载、几何、设置与命令行参数四类错误，
//! 替代分散的 `.map_err(|e| e.to_string())`、`expect()` 等不一致模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `LoadError` / `GeometryError` / `std::io::Error` 提供 `From` 转换，调用侧直接 `?`。
//! - 实现 `Serialize` 将错误序列化为字符串，便于 CLI 以 JSON 输出。

use serde::Serialize;

use crate::geometry::GeometryError;
use crate::image_loader::LoadError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片加载流水线错误（下载 / 读取 / 解析）
    #[error("{0}")]
    Load(#[from] LoadError),

    /// 几何计算前置条件不满足
    #[error("{0}")]
    Geometry(#[from] GeometryError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写或解析失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Usage(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
