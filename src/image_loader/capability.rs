//! 图片加载能力抽象。
//!
//! 控件只依赖这个 trait：生产环境注入 `NetworkImageLoader`，测试注入同步返回的假实现。

use std::future::Future;

use super::{ImageSource, LoadError};
use crate::geometry::Dimensions;

/// 将图片来源解析为原始像素尺寸。
pub trait ImageLoader {
    fn load(&self, source: &ImageSource) -> impl Future<Output = Result<Dimensions, LoadError>> + Send;
}
