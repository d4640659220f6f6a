//! # 图片矩形选区控件
//!
//! ## 设计思路
//!
//! 控件本身不绘制任何东西，只负责在两个坐标空间之间做“翻译”：
//!
//! - 向外部拖拽选区组件（surface）输出显示坐标下的属性 `SurfaceProps`；
//! - 把 surface 回传的显示坐标选区换算回原始坐标，再交给调用方的 `on_change`。
//!
//! ## 实现思路
//!
//! - 生命周期由 `LoadState` 显式表达，加载能力通过 `ImageLoader` 注入。
//! - 不缓存任何派生几何量：每次 `render` / `handle_selection_change` 都用当前属性重新计算。
//! - 图片加载失败只记录错误日志，控件停留在 `Pending`，`render` 永远返回 `None`。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LoadState;
use crate::geometry::{
    Container, CoordinateMapper, Dimensions, GeometryError, SelectionBox, clamp_minimum,
};
use crate::image_loader::{ImageLoader, ImageSource, LoadError};

/// 选区变化回调，参数为原始坐标下的选区；`None` 表示选区被清除。
pub type ChangeCallback = Box<dyn FnMut(Option<SelectionBox>) + Send>;

/// 控件输入属性。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionProps {
    /// 图片定位符（URL / Data URL / 文件路径）。
    pub image: String,
    /// 当前可用显示区域。
    pub container: Container,
    /// 原始坐标下的最小选区宽度。
    pub min_width: Option<f64>,
    /// 原始坐标下的最小选区高度。
    pub min_height: Option<f64>,
    /// 原始坐标下的当前选区。
    pub value: Option<SelectionBox>,
}

/// 交给外部拖拽选区组件的属性（显示坐标）。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceProps {
    pub image: String,
    /// 图片缩放后的显示尺寸。
    pub image_size: Dimensions,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub value: Option<SelectionBox>,
    /// 选区坐标是否取整；原始坐标换算需要保留小数，固定为 `false`。
    pub round: bool,
}

pub struct ImageRectangleSelection {
    props: SelectionProps,
    state: LoadState,
    on_change: ChangeCallback,
}

impl fmt::Debug for ImageRectangleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageRectangleSelection")
            .field("props", &self.props)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ImageRectangleSelection {
    /// 创建控件，初始状态为 `Pending`。
    pub fn new(props: SelectionProps, on_change: ChangeCallback) -> Self {
        Self {
            props,
            state: LoadState::Pending,
            on_change,
        }
    }

    pub fn props(&self) -> &SelectionProps {
        &self.props
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// 使用注入的加载器加载当前图片，并应用结果。
    pub async fn load_image<L: ImageLoader>(&mut self, loader: &L) {
        let result = match ImageSource::parse(&self.props.image) {
            Ok(source) => loader.load(&source).await,
            Err(err) => Err(err),
        };

        self.apply_load_result(result);
    }

    /// 加载完成回调：成功则进入 `Ready`，失败只记录日志。
    pub fn apply_load_result(&mut self, result: Result<Dimensions, LoadError>) {
        let result = result.and_then(|dimensions| {
            if dimensions.is_positive() {
                Ok(dimensions)
            } else {
                Err(LoadError::Decode(format!(
                    "图片尺寸无效 {}x{}",
                    dimensions.width, dimensions.height
                )))
            }
        });

        match result {
            Ok(dimensions) => {
                log::debug!(
                    "🖼️ 图片已就绪 \"{}\" - {}x{}",
                    self.props.image,
                    dimensions.width,
                    dimensions.height
                );
                self.state = LoadState::Ready(dimensions);
            }
            Err(err) => {
                log::error!(
                    "Failed to preload image \"{}\": [{}] {}",
                    self.props.image,
                    err.code(),
                    err
                );
            }
        }
    }

    /// 更换图片，状态重置为 `Pending`，需要重新调用 `load_image`。
    pub fn set_image(&mut self, image: impl Into<String>) {
        self.props.image = image.into();
        self.state = LoadState::Pending;
    }

    pub fn set_container(&mut self, container: Container) {
        self.props.container = container;
    }

    pub fn set_value(&mut self, value: Option<SelectionBox>) {
        self.props.value = value;
    }

    pub fn set_minimums(&mut self, min_width: Option<f64>, min_height: Option<f64>) {
        self.props.min_width = min_width;
        self.props.min_height = min_height;
    }

    /// 当前属性下的坐标换算器。
    pub fn mapper(&self) -> Result<CoordinateMapper, GeometryError> {
        let natural = self.state.natural().ok_or(GeometryError::NotReady)?;
        CoordinateMapper::fit(natural, self.props.container)
    }

    /// 计算交给拖拽选区组件的属性。
    ///
    /// 图片未就绪或容器尚未布局时返回 `None`（不渲染）。
    pub fn render(&self) -> Option<SurfaceProps> {
        let mapper = self.mapper().ok()?;
        let minimum = clamp_minimum(self.props.min_width, self.props.min_height, self.props.container);

        Some(SurfaceProps {
            image: self.props.image.clone(),
            image_size: mapper.scaled(),
            min_width: minimum.width,
            min_height: minimum.height,
            value: self.props.value.map(|value| mapper.natural_box_to_scaled(value)),
            round: false,
        })
    }

    /// 处理拖拽选区组件回传的显示坐标选区。
    ///
    /// 换算为原始坐标后调用 `on_change` 并返回换算结果；控件无法渲染时不调用回调。
    pub fn handle_selection_change(
        &mut self,
        data: Option<SelectionBox>,
    ) -> Result<Option<SelectionBox>, GeometryError> {
        let mapper = self.mapper().inspect_err(|err| {
            log::warn!("⚠️ 忽略选区变化：{}", err);
        })?;

        let natural = data.map(|scaled| mapper.scaled_box_to_natural(scaled));
        (self.on_change)(natural);

        Ok(natural)
    }
}
