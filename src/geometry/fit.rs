//! 等比缩放计算模块
//!
//! 给定图片原始尺寸与容器尺寸，计算图片在容器内等比显示时的尺寸。
//!
//! # 规则
//!
//! - 比较高宽比：图片相对容器“更高”时贴住上下边界，否则贴住左右边界。
//! - 贴边的那一维取 `min(原始尺寸, 容器尺寸)`，只缩小不放大。
//! - 另一维按原始宽高比推导。

use super::{Container, Dimensions, GeometryError};

/// 判断图片在容器中是否贴住上下边界（即按高度缩放）。
///
/// 图片高宽比严格大于容器高宽比时返回 `true`；相等时按宽度缩放。
pub fn touches_horizontal_borders(natural: Dimensions, container: Container) -> bool {
    let image_height_to_width = natural.height / natural.width;
    let container_height_to_width = container.height / container.width;
    image_height_to_width > container_height_to_width
}

/// 计算图片在容器内的显示尺寸。
///
/// # 返回
/// - `Ok(Dimensions)`：缩放后的显示尺寸，宽高比与 `natural` 一致
/// - `Err(GeometryError::EmptyImage)`：图片宽或高不是正数
/// - `Err(GeometryError::ContainerNotLaidOut)`：容器宽或高不是正数
///
/// # 后置条件
/// - `result.width <= natural.width` 且 `result.height <= natural.height`
/// - 贴边的那一维不超过容器
///
/// # 示例
/// ```
/// use image_rect_selection::geometry::{compute_fit, Container, Dimensions};
///
/// let scaled = compute_fit(Dimensions::new(1000.0, 500.0), Container::new(400.0, 400.0))?;
/// assert_eq!(scaled, Dimensions::new(400.0, 200.0));
/// # Ok::<(), image_rect_selection::geometry::GeometryError>(())
/// ```
pub fn compute_fit(natural: Dimensions, container: Container) -> Result<Dimensions, GeometryError> {
    if !natural.is_positive() {
        return Err(GeometryError::EmptyImage);
    }
    if !container.is_laid_out() {
        return Err(GeometryError::ContainerNotLaidOut);
    }

    if touches_horizontal_borders(natural, container) {
        let height = natural.height.min(container.height);
        let width = height * natural.width / natural.height;
        Ok(Dimensions::new(width, height))
    } else {
        let width = natural.width.min(container.width);
        let height = width * natural.height / natural.width;
        Ok(Dimensions::new(width, height))
    }
}
