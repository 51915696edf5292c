#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-pagenav]";

/// Default CSS for the generated menu, section highlight and scroll-up button.
/// Page stylesheets loaded later override these rules.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --pagenav-link-color: #1f2933;
  --pagenav-link-active-color: #ffffff;
  --pagenav-link-active-bg: #333333;
  --pagenav-section-active-bg: linear-gradient(0deg, rgba(255, 255, 255, 0.1) 0%, rgba(255, 255, 255, 0.2) 100%);
  --pagenav-scroll-up-bg: rgba(15, 23, 42, 0.78);
  --pagenav-scroll-up-color: #ffffff;
  --pagenav-transition: 0.3s ease-in-out;
}

html {
  scroll-behavior: smooth;
}

.page__header {
  transition: opacity var(--pagenav-transition), visibility var(--pagenav-transition);
}

#navbar__list li {
  display: inline-block;
}

.menu__link {
  display: block;
  padding: 1em;
  color: var(--pagenav-link-color);
  text-decoration: none;
  transition: background var(--pagenav-transition), color var(--pagenav-transition);
}

.menu__link:hover,
.menu__link.active {
  color: var(--pagenav-link-active-color);
  background: var(--pagenav-link-active-bg);
}

section.active-section {
  background: var(--pagenav-section-active-bg);
}

#scroll-up {
  position: fixed;
  right: 24px;
  bottom: 24px;
  z-index: 10;
  opacity: 0;
  visibility: hidden;
  transition: opacity var(--pagenav-transition), visibility var(--pagenav-transition);
}

#scroll-up .scroll-link {
  display: block;
  padding: 12px 14px;
  border-radius: 50%;
  background: var(--pagenav-scroll-up-bg);
  color: var(--pagenav-scroll-up-color);
  font-weight: 600;
  text-decoration: none;
}

@media only screen and (max-width: 35em) {
  #navbar__list li {
    display: block;
  }

  #scroll-up {
    right: 12px;
    bottom: 12px;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-pagenav", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    // Chèn đầu <head> để stylesheet của trang được ưu tiên.
    let first = head.first_child();
    head.insert_before(&style_el.clone().dyn_into::<Node>()?, first.as_ref())?;

    Ok(())
}
