use pagenav_core::{NavError, Rect, ScrollBehavior, View, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior as WebScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

/// [`View`] trên DOM thật của trình duyệt.
pub struct WebView {
    window: Window,
    document: Document,
}

impl WebView {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn client_size(&self) -> (f64, f64) {
        self.document
            .document_element()
            .map(|root| (root.client_width() as f64, root.client_height() as f64))
            .unwrap_or((0.0, 0.0))
    }
}

fn dom_error(err: JsValue) -> NavError {
    NavError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl View for WebView {
    type Element = Element;

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, NavError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(dom_error)?;
        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn query(&self, selector: &str) -> Result<Option<Element>, NavError> {
        self.document.query_selector(selector).map_err(dom_error)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), NavError> {
        element.set_attribute(name, value).map_err(dom_error)
    }

    fn create_element(&self, tag: &str) -> Result<Element, NavError> {
        self.document.create_element(tag).map_err(dom_error)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), NavError> {
        parent.append_child(child).map(|_| ()).map_err(dom_error)
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<(), NavError> {
        element.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<(), NavError> {
        element.class_list().remove_1(class).map_err(dom_error)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<(), NavError> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| NavError::Dom(format!("<{}> không có inline style", element.tag_name())))?;
        html.style().set_property(property, value).map_err(dom_error)
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect {
            top: rect.top(),
            left: rect.left(),
            bottom: rect.bottom(),
            right: rect.right(),
        }
    }

    fn viewport(&self) -> Viewport {
        let (client_width, client_height) = self.client_size();
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .filter(|px| *px > 0.0)
            .unwrap_or(client_width);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .filter(|px| *px > 0.0)
            .unwrap_or(client_height);
        Viewport { width, height }
    }

    fn scroll_offset(&self) -> f64 {
        self.window
            .scroll_y()
            .ok()
            .or_else(|| {
                self.document
                    .document_element()
                    .map(|root| root.scroll_top() as f64)
            })
            .unwrap_or(0.0)
    }

    fn scroll_into_view(&self, element: &Element, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => WebScrollBehavior::Smooth,
            ScrollBehavior::Instant => WebScrollBehavior::Instant,
        });
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
