//! # 图片加载模块（image_loader）
//!
//! ## 设计思路
//!
//! 控件只需要图片的原始像素尺寸。该模块把“定位符识别 → 字节加载校验 → 图片头解析”
//! 按职责拆分为多个子模块，并通过 `ImageLoader` trait 向控件暴露可注入的加载能力。
//!
//! - `capability`：`ImageLoader` trait（控件依赖的唯一接口）
//! - `handler`：`NetworkImageLoader`，编排整条流水线并缓存结果
//! - `loader`：负责 URL / Data URL / 文件加载与安全校验
//! - `pipeline`：只读图片头获得尺寸，并做像素上限校验
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! ImageRectangleSelection::load_image
//!    ↓
//! ImageLoader::load（trait，可替换为测试假实现）
//!    ↓
//! handler.rs（缓存 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + URL/体积/签名校验）
//!    └─ pipeline.rs（图片头尺寸 + 像素限制）
//!    ↓
//! Result<Dimensions, LoadError>
//! ```

mod capability;
mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use capability::ImageLoader;
pub use config::LoaderConfig;
pub use error::LoadError;
pub use handler::NetworkImageLoader;
pub use source::ImageSource;
