//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理不同来源（URL / Data URL / 本地文件）的原始字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - URL：协议 + 主机安全 + 手动重定向 + 内容类型 + 体积校验 + 流式下载。
//! - Base64：格式解析 + 解码前体积估算。
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 所有来源最后都用文件签名（magic bytes）确认是图片。

use base64::{Engine as _, engine::general_purpose};
use std::net::IpAddr;
use std::path::Path;

use super::source::RawImageData;
use super::{LoadError, NetworkImageLoader};

const STREAM_SIGNATURE_PROBE_BYTES: usize = 4096;
const BUFFER_INITIAL_CAPACITY: usize = 16 * 1024;

impl NetworkImageLoader {
    /// 从 URL 加载图片原始字节。
    pub(super) async fn load_from_url(&self, url: &str) -> Result<RawImageData, LoadError> {
        log::info!("🌐 开始下载图片 - URL: {}", Self::redact_url_for_log(url));

        self.validate_url_safety(url)?;
        let bytes = self.download_with_validation(url).await?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "url",
        })
    }

    /// 从 Base64 / Data URL 加载图片原始字节。
    pub(super) fn load_from_base64(&self, data: &str) -> Result<RawImageData, LoadError> {
        log::info!("📝 开始处理 base64 图片");

        let bytes = Self::parse_base64_with_limit(data, self.config.max_file_size)?;
        if bytes.len() as u64 > self.config.max_file_size {
            return Err(LoadError::ResourceLimit(format!(
                "Base64 解码后体积过大：{:.2} MB（限制：{:.2} MB）",
                bytes.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "base64",
        })
    }

    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(&self, path: &str) -> Result<RawImageData, LoadError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path);

        let file_path = Path::new(path);
        if !file_path.exists() {
            return Err(LoadError::FileSystem(format!("文件不存在：{}", path)));
        }

        let metadata = std::fs::metadata(file_path)
            .map_err(|e| LoadError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > self.config.max_file_size {
            return Err(LoadError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(file_path)
            .map_err(|e| LoadError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "file",
        })
    }

    /// 执行带校验的网络下载。
    ///
    /// 手动跟随重定向，每一跳都重新做安全校验；使用流式读取，边读边检查体积。
    pub(super) async fn download_with_validation(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let mut current_url = reqwest::Url::parse(url)
            .map_err(|e| LoadError::InvalidFormat(format!("URL 格式错误：{}", e)))?;

        for redirect_count in 0..=self.config.max_redirects {
            log::debug!("📡 发送 HTTP 请求...");
            let response = self
                .http
                .get(current_url.clone())
                .header(
                    reqwest::header::ACCEPT,
                    "image/avif,image/webp,image/apng,image/*,*/*;q=0.8",
                )
                .send()
                .await
                .map_err(|e| self.map_reqwest_error(e, current_url.as_str()))?;

            if response.status().is_redirection() {
                if redirect_count >= self.config.max_redirects {
                    return Err(LoadError::Network(format!(
                        "重定向次数超过限制（{}）",
                        self.config.max_redirects
                    )));
                }

                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .ok_or_else(|| LoadError::Network("重定向响应缺少 Location 头".to_string()))?;

                let location_str = location
                    .to_str()
                    .map_err(|e| LoadError::InvalidFormat(format!("重定向地址无效：{}", e)))?;

                let next_url = current_url
                    .join(location_str)
                    .map_err(|e| LoadError::InvalidFormat(format!("重定向 URL 解析失败：{}", e)))?;

                self.validate_url_safety(next_url.as_str())?;

                log::debug!("↪️ 跳转到: {}", Self::redact_url_for_log(next_url.as_str()));
                current_url = next_url;
                continue;
            }

            if !response.status().is_success() {
                return Err(LoadError::Network(format!(
                    "HTTP {}: {}",
                    response.status().as_u16(),
                    Self::status_message(response.status().as_u16())
                )));
            }

            if let Some(ct) = response.headers().get(reqwest::header::CONTENT_TYPE) {
                if let Ok(ct_str) = ct.to_str() {
                    if !Self::is_image_content_type(ct_str) {
                        return Err(LoadError::InvalidFormat(format!("不是图片类型：{}", ct_str)));
                    }
                }
            }

            let total_len = response
                .headers()
                .get(reqwest::header::CONTENT_LENGTH)
                .and_then(|cl| cl.to_str().ok())
                .and_then(|cl| cl.parse::<u64>().ok());

            if let Some(size) = total_len {
                if size > self.config.max_file_size {
                    return Err(LoadError::ResourceLimit(format!(
                        "文件过大：{:.2} MB（限制：{:.2} MB）",
                        size as f64 / 1024.0 / 1024.0,
                        self.config.max_file_size as f64 / 1024.0 / 1024.0
                    )));
                }
            }

            let initial_capacity = total_len
                .map(|len| len.min(self.config.max_file_size) as usize)
                .filter(|len| *len > 0)
                .unwrap_or(BUFFER_INITIAL_CAPACITY);
            let mut buffer = Vec::with_capacity(initial_capacity);
            let mut response = response;
            let mut total: u64 = 0;
            let mut signature_validated = false;

            while let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| self.map_reqwest_error(e, current_url.as_str()))?
            {
                total = total.saturating_add(chunk.len() as u64);
                if total > self.config.max_file_size {
                    return Err(LoadError::ResourceLimit("下载后文件超过大小限制".to_string()));
                }
                buffer.extend_from_slice(&chunk);

                if !signature_validated {
                    signature_validated =
                        Self::validate_stream_signature_probe(&buffer, STREAM_SIGNATURE_PROBE_BYTES)?;
                }
            }

            log::debug!("✅ 下载完成 - {} bytes", total);
            return Ok(buffer);
        }

        Err(LoadError::Network("下载流程异常结束".to_string()))
    }

    /// 校验 URL 安全性。
    ///
    /// 默认阻止本地/内网目标，防止 SSRF 风险。
    pub(super) fn validate_url_safety(&self, url: &str) -> Result<(), LoadError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| LoadError::InvalidFormat(format!("URL 格式错误：{}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(LoadError::InvalidFormat("仅支持 HTTP/HTTPS".to_string()));
        }

        if self.config.allow_private_network {
            return Ok(());
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| LoadError::InvalidFormat("URL 缺少主机地址".to_string()))?;

        if Self::is_local_hostname(host) {
            return Err(LoadError::InvalidFormat(format!("禁止访问本地网络地址：{}", host)));
        }

        let literal = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = literal.parse::<IpAddr>() {
            if Self::is_private_or_local_ip(ip) {
                return Err(LoadError::InvalidFormat(format!("禁止访问内网 IP：{}", ip)));
            }
        }

        Ok(())
    }

    fn is_local_hostname(host: &str) -> bool {
        host.eq_ignore_ascii_case("localhost")
            || host.eq_ignore_ascii_case("localhost.")
            || host.ends_with(".local")
    }

    /// 判断 IP 是否属于本地/内网/链路本地等受限范围。
    fn is_private_or_local_ip(ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => {
                if v4.is_private()
                    || v4.is_loopback()
                    || v4.is_link_local()
                    || v4.is_broadcast()
                    || v4.is_documentation()
                    || v4.is_unspecified()
                    || v4.is_multicast()
                {
                    return true;
                }

                // 0.0.0.0/8 与运营商级 NAT 100.64.0.0/10
                let octets = v4.octets();
                octets[0] == 0 || (octets[0] == 100 && (octets[1] & 0b1100_0000) == 0b0100_0000)
            }
            IpAddr::V6(v6) => {
                v6.is_loopback()
                    || v6.is_unspecified()
                    || v6.is_unique_local()
                    || v6.is_unicast_link_local()
                    || v6.is_multicast()
            }
        }
    }

    fn is_image_content_type(content_type: &str) -> bool {
        content_type
            .split(';')
            .next()
            .map(|base| base.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false)
    }

    pub(super) fn redact_url_for_log(url: &str) -> String {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return "<invalid-url>".to_string();
        };

        let host = parsed.host_str().unwrap_or("<unknown-host>");
        let port = parsed.port().map(|p| format!(":{}", p)).unwrap_or_default();

        format!("{}://{}{}{}", parsed.scheme(), host, port, parsed.path())
    }

    fn estimate_base64_decoded_upper_bound_len(base64_data: &str) -> Result<u64, LoadError> {
        let len = base64_data.trim().len() as u64;
        let groups = len
            .checked_add(3)
            .ok_or_else(|| LoadError::ResourceLimit("Base64 输入长度溢出".to_string()))?
            / 4;

        groups
            .checked_mul(3)
            .ok_or_else(|| LoadError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
    }

    /// 解析 Base64 输入（支持 Data URL / 纯 Base64）。
    fn parse_base64_with_limit(data: &str, max_file_size: u64) -> Result<Vec<u8>, LoadError> {
        let normalized = data.trim();

        let payload = if normalized.to_ascii_lowercase().starts_with("data:") {
            let base64_start = normalized
                .find(";base64,")
                .ok_or_else(|| LoadError::InvalidFormat("缺少 base64 标记".to_string()))?;
            &normalized[base64_start + ";base64,".len()..]
        } else {
            normalized
        };

        let estimated_len = Self::estimate_base64_decoded_upper_bound_len(payload)?;
        if estimated_len > max_file_size {
            return Err(LoadError::ResourceLimit(format!(
                "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
                estimated_len as f64 / 1024.0 / 1024.0,
                max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| LoadError::Decode(format!("Base64 解码失败：{}", e)))
    }

    /// 统一映射 reqwest 错误到业务错误。
    fn map_reqwest_error(&self, e: reqwest::Error, url: &str) -> LoadError {
        let redacted = Self::redact_url_for_log(url);
        let err_msg = e.to_string().replace(url, &redacted);

        if e.is_timeout() {
            LoadError::Timeout(format!("下载超时（{}秒）", self.config.download_timeout))
        } else if e.is_connect() {
            LoadError::Network(format!("无法连接：{}", err_msg))
        } else {
            LoadError::Network(format!("请求失败：{}", err_msg))
        }
    }

    fn status_message(code: u16) -> &'static str {
        match code {
            404 => "未找到",
            403 => "访问被拒绝",
            500..=599 => "服务器错误",
            _ => "请求失败",
        }
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), LoadError> {
        if bytes.is_empty() {
            return Err(LoadError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| LoadError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(LoadError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }

    /// 流式下载阶段的签名探测：尽早识别并拒绝非图片内容。
    ///
    /// 返回值：
    /// - `Ok(true)`：已识别为图片
    /// - `Ok(false)`：当前字节不足以判断，继续下载
    /// - `Err(...)`：已识别为非图片，或达到探测上限仍无法识别
    fn validate_stream_signature_probe(bytes: &[u8], probe_limit: usize) -> Result<bool, LoadError> {
        if bytes.is_empty() {
            return Ok(false);
        }

        if let Some(kind) = infer::get(bytes) {
            if kind.matcher_type() != infer::MatcherType::Image {
                return Err(LoadError::InvalidFormat(format!(
                    "下载内容不是图片类型：{}",
                    kind.mime_type()
                )));
            }
            return Ok(true);
        }

        if bytes.len() >= probe_limit {
            return Err(LoadError::InvalidFormat(format!(
                "下载前 {} 字节内无法识别图片类型",
                probe_limit
            )));
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use crate::image_loader::{ImageSource, LoaderConfig};
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use std::io::{Cursor, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn create_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 255) as u8, (y % 255) as u8, 128, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    fn private_network_loader() -> NetworkImageLoader {
        let config = LoaderConfig {
            allow_private_network: true,
            ..LoaderConfig::default()
        };
        NetworkImageLoader::new(config).expect("loader init failed")
    }

    /// 启动 HTTP 服务，按顺序处理 `connections` 个连接，每个连接原样写回响应头与响应体。
    ///
    /// 响应头由调用方完整给出（含结尾空行），便于构造缺少 `Content-Length` 的响应。
    fn serve_raw(
        connections: usize,
        head: String,
        body: Vec<u8>,
    ) -> (u16, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server failed");
        let port = listener.local_addr().expect("read local addr failed").port();

        let server = thread::spawn(move || {
            for _ in 0..connections {
                let (mut stream, _) = listener.accept().expect("accept failed");

                let mut req_buf = [0u8; 1024];
                let _ = stream.read(&mut req_buf);

                stream.write_all(head.as_bytes()).expect("write headers failed");
                // 客户端可能在读完响应头后主动断开（体积超限等），忽略写入失败
                let _ = stream.write_all(&body);
                let _ = stream.flush();
            }
        });

        (port, server)
    }

    /// 启动一次性 HTTP 服务，自动补上 `Content-Length`，返回端口与服务线程。
    fn serve_once(
        status_line: &'static str,
        headers: Vec<String>,
        body: Vec<u8>,
    ) -> (u16, thread::JoinHandle<()>) {
        let mut head = format!("{}\r\n", status_line);
        for header in headers {
            head.push_str(&header);
            head.push_str("\r\n");
        }
        head.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        ));

        serve_raw(1, head, body)
    }

    fn redirect_head(location: &str) -> String {
        format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        )
    }

    #[test]
    fn url_safety_blocks_private_targets_by_default() {
        let loader = NetworkImageLoader::new(LoaderConfig::default()).expect("loader init failed");

        for url in [
            "http://127.0.0.1/image.png",
            "https://localhost/image.png",
            "http://192.168.1.10/image.png",
            "http://[::1]/image.png",
            "http://printer.local/image.png",
        ] {
            assert!(
                matches!(loader.validate_url_safety(url), Err(LoadError::InvalidFormat(_))),
                "{} should be rejected",
                url
            );
        }

        assert!(loader.validate_url_safety("https://example.com/image.png").is_ok());
    }

    #[test]
    fn url_safety_rejects_non_http_schemes() {
        let loader = private_network_loader();

        assert!(matches!(
            loader.validate_url_safety("ftp://example.com/image.png"),
            Err(LoadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn url_safety_allows_private_targets_when_enabled() {
        let loader = private_network_loader();

        assert!(loader.validate_url_safety("http://127.0.0.1/image.png").is_ok());
    }

    #[test]
    fn content_type_parser_accepts_image_with_params() {
        assert!(NetworkImageLoader::is_image_content_type("image/png; charset=utf-8"));
        assert!(NetworkImageLoader::is_image_content_type("IMAGE/JPEG"));
        assert!(!NetworkImageLoader::is_image_content_type("text/html; charset=utf-8"));
    }

    #[test]
    fn redact_url_for_log_removes_query_and_fragment() {
        let redacted = NetworkImageLoader::redact_url_for_log(
            "https://example.com:8443/path/img.png?token=abc123#hash",
        );

        assert_eq!(redacted, "https://example.com:8443/path/img.png");
    }

    #[test]
    fn parse_base64_with_limit_rejects_large_payload_before_decode() {
        let huge = "A".repeat(1024 * 1024);
        let result = NetworkImageLoader::parse_base64_with_limit(&huge, 32);

        assert!(matches!(result, Err(LoadError::ResourceLimit(_))));
    }

    #[test]
    fn parse_base64_requires_marker_in_data_url() {
        let result = NetworkImageLoader::parse_base64_with_limit("data:image/png,AAAA", 1024);

        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn load_from_base64_accepts_data_url_and_plain_payload() {
        let loader = NetworkImageLoader::new(LoaderConfig::default()).expect("loader init failed");
        let encoded = general_purpose::STANDARD.encode(create_png_bytes(4, 4));

        let from_data_url = loader
            .load_from_base64(&format!("data:image/png;base64,{}", encoded))
            .expect("data url should load");
        let from_plain = loader.load_from_base64(&encoded).expect("plain base64 should load");

        assert_eq!(from_data_url.bytes, from_plain.bytes);
        assert_eq!(from_data_url.source_hint, "base64");
    }

    #[test]
    fn load_from_base64_rejects_non_image_payload() {
        let loader = NetworkImageLoader::new(LoaderConfig::default()).expect("loader init failed");

        let result = loader.load_from_base64("SGVsbG8=");

        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn load_from_file_reports_missing_file() {
        let loader = NetworkImageLoader::new(LoaderConfig::default()).expect("loader init failed");

        let result = loader.load_from_file("/definitely/not/here.png");

        assert!(matches!(result, Err(LoadError::FileSystem(_))));
    }

    #[test]
    fn stream_signature_probe_recognizes_png_header() {
        let png_signature = [137_u8, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13];

        assert!(matches!(
            NetworkImageLoader::validate_stream_signature_probe(&png_signature, 64),
            Ok(true)
        ));
    }

    #[test]
    fn stream_signature_probe_waits_for_more_bytes() {
        assert!(matches!(
            NetworkImageLoader::validate_stream_signature_probe(&[0x01, 0x02], 64),
            Ok(false)
        ));
    }

    #[tokio::test]
    async fn load_dimensions_from_url_reads_png_header() {
        let (port, server) = serve_once(
            "HTTP/1.1 200 OK",
            vec!["Content-Type: image/png".to_string()],
            create_png_bytes(120, 80),
        );
        let loader = private_network_loader();

        let result = loader
            .load_dimensions(&ImageSource::Url(format!("http://127.0.0.1:{}/a.png", port)))
            .await;

        server.join().expect("server thread failed");

        assert_eq!(result.expect("url should load"), Dimensions::new(120.0, 80.0));
    }

    #[tokio::test]
    async fn load_from_url_rejects_non_image_body_even_when_content_type_is_image() {
        let (port, server) = serve_once(
            "HTTP/1.1 200 OK",
            vec!["Content-Type: image/png".to_string()],
            b"hello world".to_vec(),
        );
        let loader = private_network_loader();

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/fake.png", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn load_from_url_rejects_html_content_type() {
        let (port, server) = serve_once(
            "HTTP/1.1 200 OK",
            vec!["Content-Type: text/html".to_string()],
            b"<html></html>".to_vec(),
        );
        let loader = private_network_loader();

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/page", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn load_from_url_maps_http_status_to_network_error() {
        let (port, server) = serve_once("HTTP/1.1 404 Not Found", Vec::new(), Vec::new());
        let loader = private_network_loader();

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/missing.png", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::Network(_))));
    }

    #[tokio::test]
    async fn load_from_url_enforces_declared_content_length() {
        let (port, server) = serve_once(
            "HTTP/1.1 200 OK",
            vec!["Content-Type: image/png".to_string()],
            vec![0u8; 4096],
        );
        let config = LoaderConfig {
            allow_private_network: true,
            max_file_size: 1024,
            ..LoaderConfig::default()
        };
        let loader = NetworkImageLoader::new(config).expect("loader init failed");

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/big.png", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::ResourceLimit(_))));
    }

    #[tokio::test]
    async fn download_with_validation_blocks_redirect_to_localhost() {
        let (port, server) = serve_raw(1, redirect_head("http://localhost/final.png"), Vec::new());

        // 首跳不经过 load_from_url 的安全校验，直接验证重定向目标会被拦截
        let loader = NetworkImageLoader::new(LoaderConfig::default()).expect("loader init failed");
        let url = format!("http://127.0.0.1:{}/start.png", port);

        let result = loader.download_with_validation(&url).await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn download_follows_redirect_to_final_image() {
        let (final_port, final_server) = serve_once(
            "HTTP/1.1 200 OK",
            vec!["Content-Type: image/png".to_string()],
            create_png_bytes(12, 7),
        );
        let (start_port, start_server) = serve_raw(
            1,
            redirect_head(&format!("http://127.0.0.1:{}/final.png", final_port)),
            Vec::new(),
        );
        let loader = private_network_loader();

        let result = loader
            .load_dimensions(&ImageSource::Url(format!(
                "http://127.0.0.1:{}/start.png",
                start_port
            )))
            .await;

        start_server.join().expect("start server thread failed");
        final_server.join().expect("final server thread failed");

        assert_eq!(result.expect("redirect should be followed"), Dimensions::new(12.0, 7.0));
    }

    #[tokio::test]
    async fn download_stops_when_redirect_limit_is_exceeded() {
        // 相对 Location 始终指回同一服务：第 1 跳允许，第 2 跳超出限制
        let (port, server) = serve_raw(2, redirect_head("/again.png"), Vec::new());
        let config = LoaderConfig {
            allow_private_network: true,
            max_redirects: 1,
            ..LoaderConfig::default()
        };
        let loader = NetworkImageLoader::new(config).expect("loader init failed");

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/start.png", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::Network(_))));
    }

    #[tokio::test]
    async fn streamed_body_without_content_length_is_capped() {
        let mut body = vec![137_u8, 80, 78, 71, 13, 10, 26, 10];
        body.extend(std::iter::repeat_n(0u8, 8192));
        let (port, server) = serve_raw(
            1,
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n".to_string(),
            body,
        );
        let config = LoaderConfig {
            allow_private_network: true,
            max_file_size: 1024,
            ..LoaderConfig::default()
        };
        let loader = NetworkImageLoader::new(config).expect("loader init failed");

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/stream.png", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::ResourceLimit(_))));
    }

    #[tokio::test]
    async fn slow_server_maps_to_timeout_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server failed");
        let port = listener.local_addr().expect("read local addr failed").port();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept failed");

            let mut req_buf = [0u8; 1024];
            let _ = stream.read(&mut req_buf);

            // 超过 1 秒下载超时仍不响应
            thread::sleep(std::time::Duration::from_millis(2500));
        });

        let config = LoaderConfig {
            allow_private_network: true,
            download_timeout: 1,
            ..LoaderConfig::default()
        };
        let loader = NetworkImageLoader::new(config).expect("loader init failed");

        let result = loader
            .load_from_url(&format!("http://127.0.0.1:{}/slow.png", port))
            .await;

        server.join().expect("server thread failed");

        assert!(matches!(result, Err(LoadError::Timeout(_))));
    }
}
