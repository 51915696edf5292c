#![allow(dead_code)]

use std::fs;

use pagenav_core::memory::{MemoryView, PageLayout, SectionLayout};
use pagenav_core::{NavConfig, NavController, Viewport};

pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

pub fn landing_layout() -> PageLayout {
    let data = fs::read_to_string(fixture_path("landing_page.json"))
        .expect("Không đọc được layout mẫu");
    serde_json::from_str(&data).expect("Layout mẫu không hợp lệ")
}

/// Controller đã dựng menu và nút cuộn lên cho `layout`.
pub fn mounted(layout: &PageLayout) -> NavController<MemoryView> {
    let config = NavConfig::default();
    let view = MemoryView::from_layout(layout, &config).expect("Không dựng được trang");
    let mut controller = NavController::new(view, config).expect("Không tạo được controller");
    controller.mount().expect("Không gắn được menu");
    controller
}

pub fn stacked(viewport: Viewport, content_top: f64, heights: &[f64]) -> PageLayout {
    PageLayout {
        viewport,
        header_height: Some(60.0),
        content_top,
        footer_height: 0.0,
        sections: heights
            .iter()
            .enumerate()
            .map(|(index, height)| SectionLayout {
                id: Some(format!("section{}", index + 1)),
                label: Some(format!("Section {}", index + 1)),
                height: *height,
                width: None,
            })
            .collect(),
    }
}

pub fn desktop() -> Viewport {
    Viewport {
        width: 1280.0,
        height: 720.0,
    }
}
