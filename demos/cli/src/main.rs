use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use pagenav_core::memory::{MemoryView, PageLayout};
use pagenav_core::{NavConfig, NavController, NavTarget, ScrollReport, View, Visibility};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "pagenav-cli",
    about = "Phát lại chuỗi vị trí cuộn trên một layout trang và in trạng thái điều hướng."
)]
struct Args {
    /// Đường dẫn tới file JSON mô tả layout trang.
    #[arg(short, long)]
    layout: PathBuf,

    /// Các vị trí cuộn (px), phân tách bằng dấu phẩy.
    #[arg(short, long, value_delimiter = ',', default_value = "0")]
    offsets: Vec<f64>,

    /// Click vào liên kết `#id` trước khi phát lại.
    #[arg(short, long)]
    click: Option<String>,

    /// In mỗi kết quả dưới dạng một dòng JSON.
    #[arg(long)]
    json: bool,

    /// In markup menu sau khi dựng.
    #[arg(long)]
    html: bool,
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let layout = load_layout(&args.layout)?;
    let mut controller = mount_layout(&layout)?;

    if args.html {
        let view = controller.view();
        let container = view
            .element_by_id(&controller.config().menu_container_id)
            .context("Thiếu container menu")?;
        println!("{}", view.outer_html(container));
    }

    if let Some(href) = &args.click {
        controller
            .handle_link_click(href)
            .with_context(|| format!("Không điều hướng được tới {href}"))?;
        info!(offset = controller.view().scroll_offset(), "đã cuộn tới {href}");
    }

    for report in replay(&mut controller, &args.offsets)? {
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", describe(&report));
        }
    }

    Ok(())
}

fn load_layout(path: &Path) -> anyhow::Result<PageLayout> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được file {path:?}"))?;
    serde_json::from_str(&data).with_context(|| format!("Layout không hợp lệ: {path:?}"))
}

fn mount_layout(layout: &PageLayout) -> anyhow::Result<NavController<MemoryView>> {
    let config = NavConfig::default();
    let view = MemoryView::from_layout(layout, &config)?;
    let mut controller = NavController::new(view, config)?;
    controller.mount()?;
    info!(
        sections = controller.sections().len(),
        links = controller.links().len(),
        "đã dựng menu"
    );
    Ok(controller)
}

/// Cuộn lần lượt tới từng vị trí và thu kết quả của mỗi sự kiện cuộn.
fn replay(
    controller: &mut NavController<MemoryView>,
    offsets: &[f64],
) -> anyhow::Result<Vec<ScrollReport>> {
    let mut reports = Vec::with_capacity(offsets.len());
    for offset in offsets {
        controller.view().scroll_to(*offset);
        reports.push(controller.handle_scroll()?);
    }
    Ok(reports)
}

fn describe(report: &ScrollReport) -> String {
    format!(
        "offset {:>6.0} ({:?}): link={} section={} header={} scroll-up={}",
        report.offset,
        report.direction,
        report.active_link.as_ref().map(target_label).unwrap_or("-"),
        report.active_section.as_deref().unwrap_or("-"),
        visibility_label(report.header),
        visibility_label(report.scroll_up),
    )
}

fn target_label(target: &NavTarget) -> &str {
    match target {
        NavTarget::Home => "home",
        NavTarget::Section(id) => id,
    }
}

fn visibility_label(visibility: Option<Visibility>) -> &'static str {
    match visibility {
        Some(Visibility::Visible) => "visible",
        Some(Visibility::Hidden) => "hidden",
        None => "-",
    }
}
