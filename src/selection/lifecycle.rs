//! 图片加载生命周期。
//!
//! 只有两个状态：`Pending`（已请求、尺寸未知）与 `Ready`（原始尺寸已知）。
//! 加载失败不会产生第三个状态，控件保持 `Pending` 并且不再渲染选区。

use crate::geometry::Dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(Dimensions),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// 已就绪时返回图片原始尺寸。
    pub fn natural(&self) -> Option<Dimensions> {
        match self {
            Self::Pending => None,
            Self::Ready(dimensions) => Some(*dimensions),
        }
    }
}
