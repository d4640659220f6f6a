//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `NetworkImageLoader` 只负责流程编排与缓存，不关心调用方是控件还是 CLI。
//! 处理链路固定为：
//! 1. 查询尺寸缓存
//! 2. 按来源加载原始字节
//! 3. 只读取图片头获得尺寸（不做完整解码）
//! 4. 写入缓存
//!
//! ## 实现思路
//!
//! - HTTP 客户端在构造时创建并复用，关闭自动重定向，由 `loader` 手动跟随并逐跳校验。
//! - 缓存使用 `Mutex<LruCache>`，锁只在同步辅助函数内持有，不跨越 `.await`。
//! - 记录 `load/inspect/total` 阶段耗时，便于性能诊断。

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use super::{ImageLoader, ImageSource, LoadError, LoaderConfig};
use crate::geometry::Dimensions;

/// 基于网络 / Data URL / 本地文件的图片尺寸加载器。
pub struct NetworkImageLoader {
    pub(super) config: LoaderConfig,
    pub(super) http: reqwest::Client,
    dimension_cache: Option<Mutex<LruCache<String, Dimensions>>>,
}

impl NetworkImageLoader {
    /// 根据配置创建加载器。
    ///
    /// 配置非法或 HTTP 客户端构建失败时返回错误。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use image_rect_selection::image_loader::{LoaderConfig, NetworkImageLoader};
    ///
    /// let loader = NetworkImageLoader::new(LoaderConfig::default())?;
    /// # Ok::<(), image_rect_selection::image_loader::LoadError>(())
    /// ```
    pub fn new(config: LoaderConfig) -> Result<Self, LoadError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| LoadError::Network(format!("无法创建 HTTP 客户端：{}", e)))?;

        let dimension_cache =
            NonZeroUsize::new(config.dimension_cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));

        Ok(Self {
            config,
            http,
            dimension_cache,
        })
    }

    /// 处理主入口：从任意来源读取图片原始尺寸。
    pub async fn load_dimensions(&self, source: &ImageSource) -> Result<Dimensions, LoadError> {
        let cache_key = source.cache_key();
        if let Some(cached) = self.cached_dimensions(&cache_key) {
            log::debug!("♻️ 命中尺寸缓存 - 来源: {}", source.kind());
            return Ok(cached);
        }

        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = match source {
            ImageSource::Url(url) => self.load_from_url(url).await?,
            ImageSource::Base64(data) => self.load_from_base64(data)?,
            ImageSource::FilePath(path) => self.load_from_file(path)?,
        };
        let load_elapsed = load_start.elapsed();

        let inspect_start = Instant::now();
        let dimensions = self.inspect_dimensions(&raw)?;
        let inspect_elapsed = inspect_start.elapsed();

        self.store_dimensions(cache_key, dimensions);

        log::info!(
            "✅ 图片尺寸读取完成 - 来源: {} 尺寸: {}x{} load={}ms inspect={}ms total={}ms",
            raw.source_hint,
            dimensions.width,
            dimensions.height,
            load_elapsed.as_millis(),
            inspect_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(dimensions)
    }

    fn cached_dimensions(&self, key: &str) -> Option<Dimensions> {
        let mut cache = self.dimension_cache.as_ref()?.lock().ok()?;
        cache.get(key).copied()
    }

    fn store_dimensions(&self, key: String, dimensions: Dimensions) {
        let Some(cache) = self.dimension_cache.as_ref() else {
            return;
        };

        match cache.lock() {
            Ok(mut guard) => {
                guard.put(key, dimensions);
            }
            Err(_) => log::warn!("⚠️ 尺寸缓存锁已中毒，跳过缓存写入"),
        }
    }
}

impl ImageLoader for NetworkImageLoader {
    fn load(
        &self,
        source: &ImageSource,
    ) -> impl std::future::Future<Output = Result<Dimensions, LoadError>> + Send {
        self.load_dimensions(source)
    }
}
