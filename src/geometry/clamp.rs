//! 最小选区尺寸收敛模块
//!
//! 把调用方给出的最小选区宽高收敛到容器范围内，两个值都给出时保持其宽高比。
//!
//! # 收敛顺序
//!
//! 1. 先检查高度：超出容器高度则贴齐容器高度，并按原始比例重算宽度（无比例时宽度置空）。
//! 2. 再检查宽度（可能是第 1 步重算后的值）：超出容器宽度则贴齐容器宽度，
//!    并按原始比例重算高度（无比例时高度置空）。
//!
//! 两步是顺序执行而非联立求解，第 2 步可能覆盖第 1 步的结果。

use serde::{Deserialize, Serialize};

use super::Container;

/// 收敛后的最小选区尺寸，`None` 表示该维度不限制。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MinimumSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// 0 与负数视为“未设置”：既不触发收敛，也不参与比例计算。
fn given(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// 将最小选区尺寸收敛到容器内。
///
/// # 示例
/// ```
/// use image_rect_selection::geometry::{clamp_minimum, Container, MinimumSize};
///
/// let min = clamp_minimum(Some(300.0), Some(300.0), Container::new(200.0, 400.0));
/// assert_eq!(min, MinimumSize { width: Some(200.0), height: Some(200.0) });
/// ```
pub fn clamp_minimum(
    min_width: Option<f64>,
    min_height: Option<f64>,
    container: Container,
) -> MinimumSize {
    let ratio = given(min_width).zip(given(min_height));

    let mut width = min_width;
    let mut height = min_height;

    if let Some(h) = given(height) {
        if h > container.height {
            height = Some(container.height);
            width = ratio.map(|(w0, h0)| container.height * w0 / h0);
        }
    }

    if let Some(w) = given(width) {
        if w > container.width {
            width = Some(container.width);
            height = ratio.map(|(w0, h0)| container.width * h0 / w0);
        }
    }

    MinimumSize { width, height }
}
