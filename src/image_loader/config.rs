//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `LoaderConfig`，保证运行时行为可观测、可调整、可测试。
//! 配置可通过设置文件（JSON）持久化，缺失字段使用默认值。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置。
//! - `validate` 在加载设置后统一做取值范围校验，尽早失败。

use serde::{Deserialize, Serialize};

use super::LoadError;

/// 图片加载配置。
///
/// 字段覆盖了下载、读取、尺寸解析与缓存四个阶段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// 下载/读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 网络下载超时时间（秒）。
    pub download_timeout: u64,
    /// 建立连接（TCP/TLS）超时时间（秒）。
    pub connect_timeout: u64,
    /// 最大重定向次数，避免无限跳转或恶意链路。
    pub max_redirects: usize,
    /// 是否允许访问内网或本地地址（默认关闭，防 SSRF）。
    pub allow_private_network: bool,
    /// 图片头中声明的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 尺寸缓存条目数，0 表示关闭缓存。
    pub dimension_cache_capacity: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            download_timeout: 30,
            connect_timeout: 8,
            max_redirects: 5,
            allow_private_network: false,
            max_decoded_pixels: 40_000_000,
            dimension_cache_capacity: 64,
        }
    }
}

impl LoaderConfig {
    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.max_file_size < 1024 {
            return Err(LoadError::InvalidFormat("maxFileSize 不能小于 1KB".to_string()));
        }
        if !(1..=120).contains(&self.connect_timeout) {
            return Err(LoadError::InvalidFormat("connectTimeout 必须在 1~120 秒之间".to_string()));
        }
        if !(1..=600).contains(&self.download_timeout) {
            return Err(LoadError::InvalidFormat("downloadTimeout 必须在 1~600 秒之间".to_string()));
        }
        if self.max_redirects > 20 {
            return Err(LoadError::InvalidFormat("maxRedirects 不能大于 20".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(LoadError::InvalidFormat("maxDecodedPixels 必须大于 0".to_string()));
        }

        Ok(())
    }
}
