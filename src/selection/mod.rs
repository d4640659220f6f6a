//! 图片矩形选区控件（selection）
//!
//! - `lifecycle`：图片加载状态 `Pending → Ready`
//! - `widget`：`ImageRectangleSelection`，组合几何核心与加载能力

mod lifecycle;
mod widget;

pub use lifecycle::LoadState;
pub use widget::{ChangeCallback, ImageRectangleSelection, SelectionProps, SurfaceProps};
