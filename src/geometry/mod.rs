//! # 几何核心模块（geometry）
//!
//! ## 设计思路
//!
//! 图片选区控件的全部几何逻辑都是纯函数，按职责拆分为三个子模块：
//!
//! - `fit`：按容器尺寸计算等比缩放后的显示尺寸（letterbox / pillarbox）
//! - `mapper`：原始坐标（natural）与显示坐标（scaled）之间的双向换算
//! - `clamp`：最小选区尺寸的两阶段收敛
//!
//! ## 实现思路
//!
//! 所有输入均为显式参数，不做任何缓存或响应式重算；调用方在每次布局或属性
//! 变化时重新调用即可。零尺寸等非法输入通过 `GeometryError` 显式返回，
//! 不产生 `NaN` / `Infinity`。
//!
//! ```text
//! natural ──┐
//!           ├─► compute_fit ──► scaled ──► CoordinateMapper(natural, scaled)
//! container ┘
//! min_width / min_height + container ──► clamp_minimum ──► MinimumSize
//! ```

mod clamp;
mod fit;
mod mapper;

use serde::{Deserialize, Serialize};

pub use clamp::{MinimumSize, clamp_minimum};
pub use fit::{compute_fit, touches_horizontal_borders};
pub use mapper::{Axis, CoordinateMapper};

/// 图片尺寸（宽、高）。
///
/// 既用于图片原始像素尺寸，也用于缩放后的显示尺寸，具体坐标空间由产生它的 API 决定。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 宽高均为有限正数时返回 `true`。
    pub fn is_positive(&self) -> bool {
        is_positive_length(self.width) && is_positive_length(self.height)
    }

    /// 按轴读取长度。
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// 外部布局提供的可用显示区域。
///
/// 布局尚未完成时宽或高可能为 0。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 容器宽高均为有限正数时才视为已完成布局。
    pub fn is_laid_out(&self) -> bool {
        is_positive_length(self.width) && is_positive_length(self.height)
    }
}

/// 某个坐标空间中的矩形选区。
///
/// 有效选区各字段均 `>= 0`；宽高为 0 表示空选区。“无选区”使用 `Option::None` 表达。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionBox {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// 几何计算的前置条件错误。
///
/// 替代原先静默产生的 `NaN` / `Infinity`，让“未就绪”状态在类型上可见。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("图片尺寸无效：宽高必须为正数")]
    EmptyImage,

    #[error("容器尚未完成布局：宽高必须为正数")]
    ContainerNotLaidOut,

    #[error("缩放尺寸无效：宽高必须为正数")]
    DegenerateScale,

    #[error("图片尚未加载完成")]
    NotReady,
}

pub(crate) fn is_positive_length(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_reject_zero_and_nan() {
        assert!(Dimensions::new(10.0, 5.0).is_positive());
        assert!(!Dimensions::new(0.0, 5.0).is_positive());
        assert!(!Dimensions::new(10.0, f64::NAN).is_positive());
        assert!(!Dimensions::new(f64::INFINITY, 5.0).is_positive());
    }

    #[test]
    fn container_is_not_laid_out_until_both_sides_positive() {
        assert!(!Container::default().is_laid_out());
        assert!(!Container::new(400.0, 0.0).is_laid_out());
        assert!(Container::new(400.0, 300.0).is_laid_out());
    }

    #[test]
    fn selection_box_serializes_with_field_names() {
        let json = serde_json::to_value(SelectionBox::new(1.0, 2.0, 3.0, 4.0))
            .expect("serialize selection box");

        assert_eq!(
            json,
            serde_json::json!({"left": 1.0, "top": 2.0, "width": 3.0, "height": 4.0})
        );
    }
}
