//! Logic lõi dựng menu điều hướng và theo dõi vị trí cuộn của trang.

use serde::{Deserialize, Serialize};

mod controller;
pub mod memory;
mod view;

pub use controller::{MenuLink, NavController, SectionNode};
pub use view::{ScrollBehavior, View};

/// Cấu hình selector, tên class và các ngưỡng cuộn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavConfig {
    /// Selector của các section tạo nên menu.
    pub section_selector: String,
    /// Selector của header trang (ẩn khi cuộn xuống sâu).
    pub header_selector: String,
    /// Id của phần tử chứa danh sách menu.
    pub menu_container_id: String,
    pub link_class: String,
    pub active_class: String,
    pub active_section_class: String,
    /// Id của neo đầu trang mà mục "Home" trỏ tới.
    pub home_id: String,
    pub home_label: String,
    pub scroll_up_id: String,
    pub scroll_up_link_class: String,
    pub scroll_up_label: String,
    /// Dưới ngưỡng này (px) section đầu tiên vẫn làm sáng mục "Home".
    pub home_threshold: f64,
    /// Vượt ngưỡng này (px) nút cuộn lên đầu trang được hiển thị.
    pub scroll_up_threshold: f64,
    /// Vượt ngưỡng này (px) và đang cuộn xuống thì header bị ẩn.
    pub header_threshold: f64,
    /// `false` thì click vào menu nhảy thẳng tới section, không cuộn mượt.
    pub smooth_scroll: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            section_selector: "section".to_string(),
            header_selector: ".page__header".to_string(),
            menu_container_id: "navbar__list".to_string(),
            link_class: "menu__link".to_string(),
            active_class: "active".to_string(),
            active_section_class: "active-section".to_string(),
            home_id: "top".to_string(),
            home_label: "Home".to_string(),
            scroll_up_id: "scroll-up".to_string(),
            scroll_up_link_class: "scroll-link".to_string(),
            scroll_up_label: "UP".to_string(),
            home_threshold: 350.0,
            scroll_up_threshold: 400.0,
            header_threshold: 600.0,
            smooth_scroll: true,
        }
    }
}

impl NavConfig {
    /// Kiểm tra cấu hình trước khi gắn vào trang.
    pub fn validate(&self) -> Result<(), NavError> {
        let thresholds = [
            ("home_threshold", self.home_threshold),
            ("scroll_up_threshold", self.scroll_up_threshold),
            ("header_threshold", self.header_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(NavError::Config(format!(
                    "{name} phải là số không âm, nhận được {value}"
                )));
            }
        }

        let identifiers = [
            ("section_selector", &self.section_selector),
            ("menu_container_id", &self.menu_container_id),
            ("link_class", &self.link_class),
            ("active_class", &self.active_class),
            ("active_section_class", &self.active_section_class),
            ("home_id", &self.home_id),
            ("scroll_up_id", &self.scroll_up_id),
        ];
        for (name, value) in identifiers {
            if value.trim().is_empty() {
                return Err(NavError::Config(format!("{name} không được để trống")));
            }
        }

        Ok(())
    }
}

/// Đích của một liên kết trong menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum NavTarget {
    Home,
    Section(String),
}

impl NavTarget {
    /// Đọc đích từ `href` dạng `#id`. `home_id` ứng với [`NavTarget::Home`].
    pub fn from_href(href: &str, home_id: &str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        if id == home_id {
            Some(Self::Home)
        } else {
            Some(Self::Section(id.to_string()))
        }
    }

    /// Id phần tử mà đích này trỏ tới.
    pub fn element_id<'a>(&'a self, home_id: &'a str) -> &'a str {
        match self {
            Self::Home => home_id,
            Self::Section(id) => id,
        }
    }

    pub fn href(&self, home_id: &str) -> String {
        format!("#{}", self.element_id(home_id))
    }
}

/// Hình chữ nhật bao, tọa độ tính theo viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// Kích thước vùng nhìn thấy của trình duyệt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// `true` khi `rect` nằm trọn trong viewport.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= self.height && rect.right <= self.width
    }
}

/// Trạng thái hiển thị áp dụng qua inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn opacity(self) -> &'static str {
        match self {
            Self::Visible => "1",
            Self::Hidden => "0",
        }
    }

    pub fn css_value(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

/// Hướng cuộn so với lần cuộn trước.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Down,
    Up,
    Still,
}

impl ScrollDirection {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Self::Down
        } else if current < previous {
            Self::Up
        } else {
            Self::Still
        }
    }
}

/// Kết quả xử lý một sự kiện cuộn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollReport {
    pub offset: f64,
    pub direction: ScrollDirection,
    /// Liên kết đang sáng sau sự kiện, nếu có section nào lọt trọn viewport.
    pub active_link: Option<NavTarget>,
    /// Section mang class `active-section` sau sự kiện (id).
    pub active_section: Option<String>,
    pub header: Option<Visibility>,
    pub scroll_up: Option<Visibility>,
}

/// Lỗi chung khi dựng và cập nhật điều hướng.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("Không tìm thấy phần tử: {0}")]
    MissingElement(String),
    #[error("Menu đã được dựng")]
    AlreadyBuilt,
    #[error("Cấu hình không hợp lệ: {0}")]
    Config(String),
    #[error("Lỗi DOM: {0}")]
    Dom(String),
}

/// Trạng thái hiển thị của nút cuộn lên đầu trang tại `offset`.
pub fn scroll_up_visibility(offset: f64, threshold: f64) -> Visibility {
    if offset > threshold {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Header ẩn khi đã cuộn quá ngưỡng và vẫn đang cuộn xuống.
pub fn header_visibility(offset: f64, previous: f64, threshold: f64) -> Visibility {
    if offset > threshold && offset > previous {
        Visibility::Hidden
    } else {
        Visibility::Visible
    }
}
