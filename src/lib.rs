//! # 图片矩形选区：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │        外部拖拽选区组件（surface，显示坐标）              │
//! │          ↑ SurfaceProps          ↓ 选区变化               │
//! └──────────┼───────────────────────┼───────────────────────┘
//!            │                       │
//! ┌──────────┼───────────────────────┼───────────────────────┐
//! │  selection ── ImageRectangleSelection (Pending → Ready)   │
//! │     │                                                     │
//! │     ├─ geometry ──── compute_fit / CoordinateMapper       │
//! │     │                clamp_minimum（纯函数）              │
//! │     │                                                     │
//! │     └─ image_loader ─ ImageLoader trait                   │
//! │                       NetworkImageLoader（URL/Data/文件） │
//! │                                                           │
//! │  error ── AppError      settings ── JSON 设置文件         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`geometry`] | 等比缩放、坐标换算、最小选区收敛 |
//! | [`image_loader`] | 从 URL / Data URL / 文件读取图片原始尺寸 |
//! | [`selection`] | 选区控件状态：加载生命周期、渲染属性、回调换算 |
//! | [`settings`] | 设置文件读写 |
//! | [`error`] | 统一错误类型 `AppError` |

pub mod error;
pub mod geometry;
pub mod image_loader;
pub mod selection;
pub mod settings;
