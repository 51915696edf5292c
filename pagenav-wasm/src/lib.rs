//! Bridge WASM <-> JavaScript: gắn menu điều hướng vào trang đang chạy.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod styles;

use pagenav_core::{NavConfig, NavError};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
pub use dom::WebView;

/// Cấu hình từ JavaScript; trường nào bỏ trống thì lấy mặc định.
#[derive(Deserialize, Default)]
struct JsNavConfig {
    #[serde(default)]
    section_selector: Option<String>,
    #[serde(default)]
    header_selector: Option<String>,
    #[serde(default)]
    menu_container_id: Option<String>,
    #[serde(default)]
    link_class: Option<String>,
    #[serde(default)]
    active_class: Option<String>,
    #[serde(default)]
    active_section_class: Option<String>,
    #[serde(default)]
    home_id: Option<String>,
    #[serde(default)]
    home_label: Option<String>,
    #[serde(default)]
    scroll_up_id: Option<String>,
    #[serde(default)]
    scroll_up_link_class: Option<String>,
    #[serde(default)]
    scroll_up_label: Option<String>,
    #[serde(default)]
    home_threshold: Option<f64>,
    #[serde(default)]
    scroll_up_threshold: Option<f64>,
    #[serde(default)]
    header_threshold: Option<f64>,
    #[serde(default)]
    smooth_scroll: Option<bool>,
}

impl From<JsNavConfig> for NavConfig {
    fn from(cfg: JsNavConfig) -> Self {
        let mut base = NavConfig::default();
        if let Some(selector) = cfg.section_selector {
            base.section_selector = selector;
        }
        if let Some(selector) = cfg.header_selector {
            base.header_selector = selector;
        }
        if let Some(id) = cfg.menu_container_id {
            base.menu_container_id = id;
        }
        if let Some(class) = cfg.link_class {
            base.link_class = class;
        }
        if let Some(class) = cfg.active_class {
            base.active_class = class;
        }
        if let Some(class) = cfg.active_section_class {
            base.active_section_class = class;
        }
        if let Some(id) = cfg.home_id {
            base.home_id = id;
        }
        if let Some(label) = cfg.home_label {
            base.home_label = label;
        }
        if let Some(id) = cfg.scroll_up_id {
            base.scroll_up_id = id;
        }
        if let Some(class) = cfg.scroll_up_link_class {
            base.scroll_up_link_class = class;
        }
        if let Some(label) = cfg.scroll_up_label {
            base.scroll_up_label = label;
        }
        if let Some(px) = cfg.home_threshold {
            base.home_threshold = px;
        }
        if let Some(px) = cfg.scroll_up_threshold {
            base.scroll_up_threshold = px;
        }
        if let Some(px) = cfg.header_threshold {
            base.header_threshold = px;
        }
        if let Some(smooth) = cfg.smooth_scroll {
            base.smooth_scroll = smooth;
        }
        base
    }
}

/// Thông điệp lỗi trả về phía JavaScript.
pub fn format_nav_error(err: NavError) -> String {
    format!("Page navigation error: {err}")
}

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pagenav_core::{NavConfig, NavController};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Element, Event, EventTarget};

    use crate::{dom::WebView, format_nav_error, styles, JsNavConfig};

    type SharedController = Rc<RefCell<NavController<WebView>>>;

    fn parse_config(config: Option<JsValue>) -> Result<NavConfig, JsValue> {
        let cfg = match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                let cfg: JsNavConfig = from_value(js_cfg)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
                NavConfig::from(cfg)
            }
            _ => NavConfig::default(),
        };
        cfg.validate()
            .map_err(|err| JsValue::from_str(&format_nav_error(err)))?;
        Ok(cfg)
    }

    /// Dựng menu, nút cuộn lên và gắn các listener `click` / `scroll`.
    #[wasm_bindgen]
    pub fn init_page_navigation(config: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = parse_config(config)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        if let Err(err) = styles::ensure_styles(&document) {
            console::error_1(&err);
        }

        let view = WebView::new(window.clone(), document);
        let mut controller = NavController::new(view, config).map_err(to_js)?;
        controller.build_menu().map_err(to_js)?;
        let scroll_link = controller.create_scroll_up().map_err(to_js)?;

        let links: Vec<Element> = controller
            .links()
            .iter()
            .map(|link| link.element.clone())
            .collect();
        let controller: SharedController = Rc::new(RefCell::new(controller));

        for link in links {
            attach_link_click(&controller, link)?;
        }
        attach_scroll_up_click(&controller, &scroll_link)?;
        attach_window_scroll(&controller, &window)?;

        Ok(())
    }

    fn attach_link_click(controller: &SharedController, link: Element) -> Result<(), JsValue> {
        let controller = Rc::clone(controller);
        let target = link.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let Some(href) = target.get_attribute("href") else {
                return;
            };
            if let Err(err) = controller.borrow_mut().handle_link_click(&href) {
                report(err);
            }
        });
        listen(&link, "click", closure)
    }

    fn attach_scroll_up_click(controller: &SharedController, link: &Element) -> Result<(), JsValue> {
        let controller = Rc::clone(controller);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            if let Err(err) = controller.borrow().scroll_to_top() {
                report(err);
            }
        });
        listen(link, "click", closure)
    }

    fn attach_window_scroll(
        controller: &SharedController,
        window: &web_sys::Window,
    ) -> Result<(), JsValue> {
        let controller = Rc::clone(controller);
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            // Một click đang giữ controller thì bỏ qua, sự kiện cuộn kế tiếp sẽ cập nhật.
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return;
            };
            if let Err(err) = controller.handle_scroll() {
                report(err);
            }
        });
        listen(window, "scroll", closure)
    }

    /// Listener sống suốt vòng đời trang nên closure được `forget`.
    fn listen(
        target: &EventTarget,
        event: &str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn to_js(err: pagenav_core::NavError) -> JsValue {
        JsValue::from_str(&format_nav_error(err))
    }

    fn report(err: pagenav_core::NavError) {
        console::error_1(&to_js(err));
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::init_page_navigation;

#[cfg(not(target_arch = "wasm32"))]
pub fn init_page_navigation(_: Option<JsValue>) -> Result<(), JsValue> {
    Err(JsValue::from_str(
        "pagenav-wasm chỉ gắn được vào DOM khi biên dịch target wasm32",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_js_config_keeps_defaults() {
        let cfg: JsNavConfig =
            serde_json::from_str(r#"{ "header_threshold": 750.0, "home_label": "Trang chủ" }"#)
                .unwrap();
        let config = NavConfig::from(cfg);

        assert_eq!(config.header_threshold, 750.0);
        assert_eq!(config.home_label, "Trang chủ");
        assert_eq!(config.scroll_up_threshold, 400.0);
        assert_eq!(config.menu_container_id, "navbar__list");
    }

    #[test]
    fn js_config_overrides_class_names_and_scroll_up_ids() {
        let cfg: JsNavConfig = serde_json::from_str(
            r#"{
                "link_class": "nav-link",
                "active_class": "is-active",
                "active_section_class": "is-current",
                "scroll_up_id": "back",
                "scroll_up_link_class": "back-link",
                "smooth_scroll": false
            }"#,
        )
        .unwrap();
        let config = NavConfig::from(cfg);

        assert_eq!(config.link_class, "nav-link");
        assert_eq!(config.active_class, "is-active");
        assert_eq!(config.active_section_class, "is-current");
        assert_eq!(config.scroll_up_id, "back");
        assert_eq!(config.scroll_up_link_class, "back-link");
        assert!(!config.smooth_scroll);
        assert_eq!(config.home_id, "top");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_js_config_is_the_default() {
        let cfg: JsNavConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(NavConfig::from(cfg), NavConfig::default());
    }

    #[test]
    fn merged_config_is_still_validated() {
        let config = NavConfig::from(JsNavConfig {
            home_threshold: Some(-5.0),
            ..JsNavConfig::default()
        });
        assert!(matches!(config.validate(), Err(NavError::Config(_))));
        assert!(format_nav_error(NavError::AlreadyBuilt).starts_with("Page navigation error"));
    }
}
