//! # 尺寸解析模块
//!
//! 只读取图片头信息获得宽高，不做完整解码；随后按像素上限快速拒绝。

use std::io::Cursor;

use super::source::RawImageData;
use super::{LoadError, NetworkImageLoader};
use crate::geometry::Dimensions;

impl NetworkImageLoader {
    /// 从原始字节中读取图片原始尺寸。
    pub(super) fn inspect_dimensions(&self, raw: &RawImageData) -> Result<Dimensions, LoadError> {
        let reader = image::ImageReader::new(Cursor::new(raw.bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| LoadError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        if reader.format().is_none() {
            return Err(LoadError::InvalidFormat("不支持的图片格式".to_string()));
        }

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| LoadError::Decode(format!("无法读取图片尺寸：{}", e)))?;

        if width == 0 || height == 0 {
            return Err(LoadError::Decode(format!("图片尺寸为空：{}x{}", width, height)));
        }

        self.validate_pixel_limits(width, height)?;

        log::debug!(
            "🔍 图片头解析成功 - 来源: {} 尺寸: {}x{}",
            raw.source_hint,
            width,
            height
        );

        Ok(Dimensions::new(f64::from(width), f64::from(height)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), LoadError> {
        let pixels = u64::from(width)
            .checked_mul(u64::from(height))
            .ok_or_else(|| LoadError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > self.config.max_decoded_pixels {
            return Err(LoadError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, self.config.max_decoded_pixels
            )));
        }

        Ok(())
    }
}
