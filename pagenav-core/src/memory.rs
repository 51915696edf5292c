//! [`View`] trong bộ nhớ, dùng cho test và công cụ CLI phát lại.
//!
//! Các node nằm trong một arena bọc bởi `RefCell`, nhờ vậy mọi phương thức của
//! [`View`] chỉ cần `&self` giống DOM của trình duyệt. Hình học lưu theo tọa độ
//! tài liệu và được trừ đi vị trí cuộn hiện tại khi đọc.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{NavConfig, NavError, Rect, ScrollBehavior, View, Viewport};

/// Handle tới một node trong [`MemoryView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Một lần gọi `scroll_into_view` đã ghi lại.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub target: Option<String>,
    pub behavior: ScrollBehavior,
    pub offset: f64,
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    bounds: Option<Rect>,
}

#[derive(Debug)]
struct Document {
    nodes: Vec<Node>,
    viewport: Viewport,
    scroll_offset: f64,
    scroll_log: Vec<ScrollRequest>,
}

impl Document {
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Các node đã gắn vào cây, theo thứ tự tài liệu (duyệt trước từ `<body>`).
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![MemoryView::BODY];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    fn page_height(&self) -> f64 {
        self.node(MemoryView::BODY)
            .bounds
            .map(|rect| rect.bottom)
            .unwrap_or(self.viewport.height)
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        let max = (self.page_height() - self.viewport.height).max(0.0);
        offset.clamp(0.0, max)
    }
}

/// DOM không giao diện, vừa đủ hành vi cho [`crate::NavController`].
#[derive(Debug)]
pub struct MemoryView {
    doc: RefCell<Document>,
}

impl MemoryView {
    const BODY: NodeId = NodeId(0);

    /// Trang rỗng: một `<body>` bằng kích thước viewport.
    pub fn new(viewport: Viewport) -> Self {
        let body = Node {
            tag: "body".to_string(),
            bounds: Some(Rect {
                top: 0.0,
                left: 0.0,
                bottom: viewport.height,
                right: viewport.width,
            }),
            ..Node::default()
        };
        Self {
            doc: RefCell::new(Document {
                nodes: vec![body],
                viewport,
                scroll_offset: 0.0,
                scroll_log: Vec::new(),
            }),
        }
    }

    /// Dựng trang theo `layout`; id và selector lấy từ `config` để controller
    /// tìm thấy.
    pub fn from_layout(layout: &PageLayout, config: &NavConfig) -> Result<Self, NavError> {
        let view = Self::new(layout.viewport);
        let width = layout.viewport.width;
        view.set_attribute(&Self::BODY, "id", &config.home_id)?;

        if let Some(height) = layout.header_height {
            let header = view.append_new(Self::BODY, "header")?;
            if !config.header_selector.trim().is_empty() {
                view.apply_selector(header, &config.header_selector)?;
            }
            view.set_bounds(header, Rect { top: 0.0, left: 0.0, bottom: height, right: width });
            let nav = view.append_new(header, "nav")?;
            let list = view.append_new(nav, "ul")?;
            view.set_attribute(&list, "id", &config.menu_container_id)?;
        } else {
            let list = view.append_new(Self::BODY, "ul")?;
            view.set_attribute(&list, "id", &config.menu_container_id)?;
        }

        let main = view.append_new(Self::BODY, "main")?;
        let mut top = layout.content_top;
        for section in &layout.sections {
            let node = view.append_new(main, "section")?;
            if let Some(id) = &section.id {
                view.set_attribute(&node, "id", id)?;
            }
            if let Some(label) = &section.label {
                view.set_attribute(&node, "data-nav", label)?;
            }
            let right = section.width.unwrap_or(width);
            view.set_bounds(node, Rect { top, left: 0.0, bottom: top + section.height, right });
            top += section.height;
        }

        let bottom = (top + layout.footer_height).max(layout.viewport.height);
        view.set_bounds(Self::BODY, Rect { top: 0.0, left: 0.0, bottom, right: width });
        Ok(view)
    }

    pub fn body_id(&self) -> NodeId {
        Self::BODY
    }

    /// Tạo phần tử `tag` và gắn vào dưới `parent`.
    pub fn append_new(&self, parent: NodeId, tag: &str) -> Result<NodeId, NavError> {
        let child = self.create_element(tag)?;
        self.append_child(&parent, &child)?;
        Ok(child)
    }

    /// Đặt vị trí node theo tọa độ tài liệu.
    pub fn set_bounds(&self, id: NodeId, rect: Rect) {
        self.doc.borrow_mut().node_mut(id).bounds = Some(rect);
    }

    /// Nhảy tới `offset`, giới hạn trong khoảng cuộn được.
    pub fn scroll_to(&self, offset: f64) {
        let mut doc = self.doc.borrow_mut();
        doc.scroll_offset = doc.clamp_offset(offset);
    }

    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.doc.borrow().scroll_log.clone()
    }

    pub fn tag(&self, id: NodeId) -> String {
        self.doc.borrow().node(id).tag.clone()
    }

    pub fn text(&self, id: NodeId) -> String {
        self.doc.borrow().node(id).text.clone()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.doc.borrow().node(id).children.clone()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.doc.borrow().node(id).parent
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.doc.borrow().node(id).styles.get(property).cloned()
    }

    /// Xuất markup của một cây con; thuộc tính xếp theo tên.
    pub fn outer_html(&self, id: NodeId) -> String {
        let doc = self.doc.borrow();
        let mut out = String::new();
        write_html(&doc, id, &mut out);
        out
    }

    fn apply_selector(&self, id: NodeId, selector: &str) -> Result<(), NavError> {
        let selector = SimpleSelector::parse(selector)?;
        if let Some(node_id) = &selector.id {
            self.set_attribute(&id, "id", node_id)?;
        }
        for class in &selector.classes {
            self.add_class(&id, class)?;
        }
        Ok(())
    }
}

impl View for MemoryView {
    type Element = NodeId;

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, NavError> {
        let selector = SimpleSelector::parse(selector)?;
        let doc = self.doc.borrow();
        Ok(doc
            .walk()
            .into_iter()
            .filter(|id| selector.matches(doc.node(*id)))
            .collect())
    }

    fn query(&self, selector: &str) -> Result<Option<NodeId>, NavError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        doc.walk().into_iter().find(|node| {
            doc.node(*node).attributes.get("id").map(String::as_str) == Some(id)
        })
    }

    fn body(&self) -> Option<NodeId> {
        Some(Self::BODY)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let doc = self.doc.borrow();
        let node = doc.node(*element);
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), NavError> {
        let mut doc = self.doc.borrow_mut();
        let node = doc.node_mut(*element);
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, NavError> {
        if tag.is_empty() || !tag.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(NavError::Dom(format!("tên thẻ không hợp lệ: {tag:?}")));
        }
        let mut doc = self.doc.borrow_mut();
        doc.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        Ok(NodeId(doc.nodes.len() - 1))
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        let mut doc = self.doc.borrow_mut();
        let node = doc.node_mut(*element);
        node.text = text.to_string();
        node.children.clear();
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), NavError> {
        if parent == child {
            return Err(NavError::Dom("không thể gắn một node vào chính nó".to_string()));
        }
        let mut doc = self.doc.borrow_mut();
        let mut cursor = Some(*parent);
        while let Some(id) = cursor {
            if id == *child {
                return Err(NavError::Dom("không thể gắn node tổ tiên vào con của nó".to_string()));
            }
            cursor = doc.node(id).parent;
        }
        if let Some(old_parent) = doc.node(*child).parent {
            doc.node_mut(old_parent).children.retain(|id| id != child);
        }
        doc.node_mut(*child).parent = Some(*parent);
        doc.node_mut(*parent).children.push(*child);
        Ok(())
    }

    fn add_class(&self, element: &NodeId, class: &str) -> Result<(), NavError> {
        validate_class(class)?;
        let mut doc = self.doc.borrow_mut();
        let node = doc.node_mut(*element);
        if !node.classes.iter().any(|existing| existing == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> Result<(), NavError> {
        validate_class(class)?;
        self.doc
            .borrow_mut()
            .node_mut(*element)
            .classes
            .retain(|existing| existing != class);
        Ok(())
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.doc
            .borrow()
            .node(*element)
            .classes
            .iter()
            .any(|existing| existing == class)
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) -> Result<(), NavError> {
        self.doc
            .borrow_mut()
            .node_mut(*element)
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        let doc = self.doc.borrow();
        let rect = doc.node(*element).bounds.unwrap_or_default();
        Rect {
            top: rect.top - doc.scroll_offset,
            bottom: rect.bottom - doc.scroll_offset,
            ..rect
        }
    }

    fn viewport(&self) -> Viewport {
        self.doc.borrow().viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.doc.borrow().scroll_offset
    }

    fn scroll_into_view(&self, element: &NodeId, behavior: ScrollBehavior) {
        let mut doc = self.doc.borrow_mut();
        let top = doc.node(*element).bounds.map(|rect| rect.top).unwrap_or(0.0);
        let offset = doc.clamp_offset(top);
        doc.scroll_offset = offset;
        let target = doc.node(*element).attributes.get("id").cloned();
        doc.scroll_log.push(ScrollRequest { target, behavior, offset });
    }
}

fn validate_class(class: &str) -> Result<(), NavError> {
    if class.is_empty() || class.chars().any(char::is_whitespace) {
        return Err(NavError::Dom(format!("tên class không hợp lệ: {class:?}")));
    }
    Ok(())
}

fn write_html(doc: &Document, id: NodeId, out: &mut String) {
    let node = doc.node(id);
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attributes {
        push_attribute(out, name, value);
    }
    if !node.classes.is_empty() {
        push_attribute(out, "class", &node.classes.join(" "));
    }
    if !node.styles.is_empty() {
        let style = node
            .styles
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        push_attribute(out, "style", &style);
    }
    out.push('>');
    out.push_str(&escape(&node.text));
    for child in &node.children {
        write_html(doc, *child, out);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value).replace('"', "&quot;"));
    out.push('"');
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `tag`, `#id`, `.class` và dạng ghép (`li.menu__link`). Không hỗ trợ combinator.
#[derive(Debug, Default, PartialEq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl SimpleSelector {
    fn parse(input: &str) -> Result<Self, NavError> {
        let input = input.trim();
        let unsupported = || NavError::Dom(format!("selector không được hỗ trợ: {input:?}"));
        if input.is_empty() {
            return Err(unsupported());
        }

        let mut selector = SimpleSelector::default();
        let mut rest = input;
        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            selector.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return Err(unsupported());
            }
            match marker {
                '#' => selector.id = Some(name.to_string()),
                _ => selector.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        let valid_name =
            |name: &str| name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        let all_valid = selector.tag.iter().all(|tag| valid_name(tag))
            && selector.id.iter().all(|id| valid_name(id))
            && selector.classes.iter().all(|class| valid_name(class));
        if !all_valid {
            return Err(unsupported());
        }

        Ok(selector)
    }

    fn matches(&self, node: &Node) -> bool {
        self.tag.as_ref().map_or(true, |tag| *tag == node.tag)
            && self
                .id
                .as_ref()
                .map_or(true, |id| node.attributes.get("id") == Some(id))
            && self
                .classes
                .iter()
                .all(|class| node.classes.iter().any(|existing| existing == class))
    }
}

/// Mô tả trang cho [`MemoryView::from_layout`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,
    /// Chiều cao header cố định ở đầu trang; `None` nếu trang không có header.
    #[serde(default)]
    pub header_height: Option<f64>,
    /// Vị trí bắt đầu của section đầu tiên trong tài liệu.
    #[serde(default)]
    pub content_top: f64,
    #[serde(default)]
    pub footer_height: f64,
    pub sections: Vec<SectionLayout>,
}

/// Một section, xếp ngay dưới section trước.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionLayout {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub height: f64,
    /// Mặc định bằng chiều rộng viewport.
    #[serde(default)]
    pub width: Option<f64>,
}
