use crate::{NavError, Rect, Viewport};

/// Kiểu cuộn khi đưa một phần tử vào viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Tập khả năng DOM mà controller cần.
///
/// Trình duyệt thật và DOM trong bộ nhớ đều cài đặt trait này, nhờ đó logic
/// điều hướng chạy được trong test mà không cần trình duyệt.
pub trait View {
    /// Handle tới một phần tử; sao chép rẻ.
    type Element: Clone;

    /// Mọi phần tử khớp `selector`, theo thứ tự tài liệu.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, NavError>;

    /// Phần tử đầu tiên khớp `selector`.
    fn query(&self, selector: &str) -> Result<Option<Self::Element>, NavError>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn body(&self) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str)
        -> Result<(), NavError>;

    fn create_element(&self, tag: &str) -> Result<Self::Element, NavError>;

    fn set_text(&self, element: &Self::Element, text: &str);

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), NavError>;

    fn add_class(&self, element: &Self::Element, class: &str) -> Result<(), NavError>;

    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<(), NavError>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn set_style(&self, element: &Self::Element, property: &str, value: &str)
        -> Result<(), NavError>;

    /// Hình chữ nhật bao của phần tử, tính theo viewport hiện tại.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn viewport(&self) -> Viewport;

    /// Khoảng cách cuộn dọc hiện tại tính từ đầu trang.
    fn scroll_offset(&self) -> f64;

    /// Cuộn sao cho mép trên của phần tử trùng mép trên viewport.
    fn scroll_into_view(&self, element: &Self::Element, behavior: ScrollBehavior);
}
