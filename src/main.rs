//! # 图片矩形选区：命令行入口
//!
//! 加载图片、按容器尺寸计算显示属性，并以 JSON 打印交给拖拽选区组件的属性。
//! 业务逻辑全部在库中，这里只负责参数解析、日志初始化与输出。

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use image_rect_selection::error::AppError;
use image_rect_selection::geometry::{Container, SelectionBox};
use image_rect_selection::image_loader::NetworkImageLoader;
use image_rect_selection::selection::{ImageRectangleSelection, SelectionProps};
use image_rect_selection::settings::{self, Settings};

/// 参数或设置错误时的退出码
const EXIT_FAILURE: u8 = 1;
/// 无法渲染（图片加载失败或容器为空）时的退出码
const EXIT_NOT_RENDERED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "image-rect-selection", version)]
#[command(about = "计算图片矩形选区组件的显示属性，并把显示坐标选区换算回原始坐标")]
struct CliArgs {
    /// 图片地址：http(s) URL、data URL 或本地文件路径
    image: String,
    /// 容器宽度（显示像素）
    #[arg(value_parser = parse_length)]
    container_width: f64,
    /// 容器高度（显示像素）
    #[arg(value_parser = parse_length)]
    container_height: f64,
    /// 原始坐标下的最小选区宽度
    #[arg(long, value_parser = parse_length)]
    min_width: Option<f64>,
    /// 原始坐标下的最小选区高度
    #[arg(long, value_parser = parse_length)]
    min_height: Option<f64>,
    /// 原始坐标下的当前选区：left,top,width,height
    #[arg(long, value_parser = parse_box)]
    value: Option<SelectionBox>,
    /// 模拟一次显示坐标下的选区变化：left,top,width,height
    #[arg(long, value_parser = parse_box)]
    change: Option<SelectionBox>,
    /// JSON 设置文件路径
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// 一次运行的结果。
#[derive(Debug)]
enum Outcome {
    /// `{ "surface": SurfaceProps, "change": 原始坐标选区 | null }`
    Rendered(serde_json::Value),
    NotRendered,
}

fn parse_length(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("不是有效数字：{}", raw))
}

fn parse_box(raw: &str) -> Result<SelectionBox, String> {
    let parts = raw
        .split(',')
        .map(parse_length)
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [left, top, width, height] => Ok(SelectionBox::new(*left, *top, *width, *height)),
        _ => Err(format!("需要 4 个数字（left,top,width,height）：{}", raw)),
    }
}

/// 读取设置。文件不存在时返回默认设置，并附带一条待日志初始化后输出的提示。
fn load_cli_settings(path: Option<&Path>) -> Result<(Settings, Option<String>), AppError> {
    let Some(path) = path else {
        return Ok((Settings::default(), None));
    };

    let notice = (!path.exists())
        .then(|| format!("设置文件不存在，使用默认设置: {}", path.display()));
    let settings = settings::load_settings(path)?;

    Ok((settings, notice))
}

fn exit_status(result: &Result<Outcome, AppError>) -> u8 {
    match result {
        Ok(Outcome::Rendered(_)) => 0,
        Ok(Outcome::NotRendered) => EXIT_NOT_RENDERED,
        Err(_) => EXIT_FAILURE,
    }
}

async fn run(args: CliArgs, settings: Settings) -> Result<Outcome, AppError> {
    let loader = NetworkImageLoader::new(settings.loader)?;

    let mut widget = ImageRectangleSelection::new(
        SelectionProps {
            image: args.image,
            container: Container::new(args.container_width, args.container_height),
            min_width: args.min_width,
            min_height: args.min_height,
            value: args.value,
        },
        Box::new(|value: Option<SelectionBox>| log::debug!("选区变化（原始坐标）: {:?}", value)),
    );

    widget.load_image(&loader).await;

    let Some(surface) = widget.render() else {
        return Ok(Outcome::NotRendered);
    };

    let change = match args.change {
        Some(scaled) => widget.handle_selection_change(Some(scaled))?,
        None => None,
    };

    Ok(Outcome::Rendered(serde_json::json!({
        "surface": surface,
        "change": change,
    })))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return ExitCode::SUCCESS;
            }
            _ => {
                eprint!("{err}");
                return ExitCode::from(EXIT_FAILURE);
            }
        },
    };

    let (settings, notice) = match load_cli_settings(args.settings.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str()),
    )
    .init();

    if let Some(notice) = notice {
        log::info!("⚙️ {}", notice);
    }

    let result = run(args, settings).await;
    match &result {
        Ok(Outcome::Rendered(output)) => match serde_json::to_string_pretty(output) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("输出序列化失败: {}", err);
                return ExitCode::from(EXIT_FAILURE);
            }
        },
        Ok(Outcome::NotRendered) => {
            eprintln!("无法渲染选区：图片未加载成功或容器尺寸为 0");
        }
        Err(err) => {
            log::error!("执行失败: {}", err);
            eprintln!("{}", err);
        }
    }

    ExitCode::from(exit_status(&result))
}
