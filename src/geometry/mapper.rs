//! 坐标换算模块
//!
//! 在图片原始坐标（natural）与显示坐标（scaled）之间做双向换算。
//! 水平轴（`left` / `width`）按宽度比例换算，垂直轴（`top` / `height`）按高度比例换算，
//! 两轴互不影响。

use super::{Container, Dimensions, GeometryError, SelectionBox, compute_fit};

/// 坐标轴。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// 对应宽度，作用于 `left` / `width`
    Horizontal,
    /// 对应高度，作用于 `top` / `height`
    Vertical,
}

/// 一组固定的 `(natural, scaled)` 尺寸对上的坐标换算器。
///
/// 构造时校验两侧尺寸均为正数，之后的换算不会出现除零。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    natural: Dimensions,
    scaled: Dimensions,
}

impl CoordinateMapper {
    pub fn new(natural: Dimensions, scaled: Dimensions) -> Result<Self, GeometryError> {
        if !natural.is_positive() {
            return Err(GeometryError::EmptyImage);
        }
        if !scaled.is_positive() {
            return Err(GeometryError::DegenerateScale);
        }

        Ok(Self { natural, scaled })
    }

    /// 先按容器计算显示尺寸，再构造换算器。
    pub fn fit(natural: Dimensions, container: Container) -> Result<Self, GeometryError> {
        let scaled = compute_fit(natural, container)?;
        Self::new(natural, scaled)
    }

    pub fn natural(&self) -> Dimensions {
        self.natural
    }

    pub fn scaled(&self) -> Dimensions {
        self.scaled
    }

    /// `v * scaled[axis] / natural[axis]`
    pub fn natural_to_scaled_length(&self, axis: Axis, value: f64) -> f64 {
        value * self.scaled.along(axis) / self.natural.along(axis)
    }

    /// `v * natural[axis] / scaled[axis]`
    pub fn scaled_to_natural_length(&self, axis: Axis, value: f64) -> f64 {
        value * self.natural.along(axis) / self.scaled.along(axis)
    }

    pub fn natural_box_to_scaled(&self, data: SelectionBox) -> SelectionBox {
        SelectionBox {
            width: self.natural_to_scaled_length(Axis::Horizontal, data.width),
            height: self.natural_to_scaled_length(Axis::Vertical, data.height),
            left: self.natural_to_scaled_length(Axis::Horizontal, data.left),
            top: self.natural_to_scaled_length(Axis::Vertical, data.top),
        }
    }

    pub fn scaled_box_to_natural(&self, data: SelectionBox) -> SelectionBox {
        SelectionBox {
            width: self.scaled_to_natural_length(Axis::Horizontal, data.width),
            height: self.scaled_to_natural_length(Axis::Vertical, data.height),
            left: self.scaled_to_natural_length(Axis::Horizontal, data.left),
            top: self.scaled_to_natural_length(Axis::Vertical, data.top),
        }
    }
}
