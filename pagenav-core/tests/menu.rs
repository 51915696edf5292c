mod common;

use pagenav_core::memory::{MemoryView, PageLayout, SectionLayout};
use pagenav_core::{NavConfig, NavController, NavError, NavTarget, ScrollBehavior, View};

use common::{desktop, landing_layout, mounted};

#[test]
fn menu_lists_home_then_sections_in_document_order() {
    let controller = mounted(&landing_layout());

    let targets: Vec<NavTarget> = controller
        .links()
        .iter()
        .map(|link| link.target.clone())
        .collect();
    assert_eq!(
        targets,
        vec![
            NavTarget::Home,
            NavTarget::Section("section1".into()),
            NavTarget::Section("section2".into()),
            NavTarget::Section("section3".into()),
            NavTarget::Section("section4".into()),
        ]
    );

    let view = controller.view();
    let container = view.element_by_id("navbar__list").unwrap();
    let items = view.children(container);
    assert_eq!(items.len(), 5);
    for item in &items {
        assert_eq!(view.tag(*item), "li");
        assert_eq!(view.children(*item).len(), 1);
    }
}

#[test]
fn menu_links_carry_href_id_class_and_label() {
    let controller = mounted(&landing_layout());
    let view = controller.view();

    let home = &controller.links()[0];
    assert_eq!(view.attribute(&home.element, "href").as_deref(), Some("#top"));
    assert_eq!(view.attribute(&home.element, "id").as_deref(), Some("link_top"));
    assert_eq!(view.text(home.element), "Home");

    let second = &controller.links()[2];
    assert_eq!(view.attribute(&second.element, "href").as_deref(), Some("#section2"));
    assert_eq!(view.attribute(&second.element, "id").as_deref(), Some("link_section2"));
    assert_eq!(view.text(second.element), "Section 2");
    assert!(view.has_class(&second.element, "menu__link"));

    let markup = view.outer_html(view.element_by_id("navbar__list").unwrap());
    assert!(markup.starts_with(
        r##"<ul id="navbar__list"><li><a href="#top" id="link_top" class="menu__link active">Home</a></li>"##
    ));
}

#[test]
fn home_is_active_right_after_build() {
    let controller = mounted(&landing_layout());
    let view = controller.view();

    assert_eq!(controller.active_link(), Some(&NavTarget::Home));
    let active: Vec<_> = controller
        .links()
        .iter()
        .filter(|link| view.has_class(&link.element, "active"))
        .map(|link| link.target.clone())
        .collect();
    assert_eq!(active, vec![NavTarget::Home]);
}

#[test]
fn page_without_sections_gets_only_home() {
    let layout = PageLayout {
        viewport: desktop(),
        header_height: Some(60.0),
        content_top: 0.0,
        footer_height: 0.0,
        sections: Vec::new(),
    };
    let controller = mounted(&layout);
    assert_eq!(controller.links().len(), 1);
    assert_eq!(controller.links()[0].target, NavTarget::Home);
}

#[test]
fn sections_without_label_fall_back_to_id_and_without_id_are_skipped() {
    let layout = PageLayout {
        viewport: desktop(),
        header_height: None,
        content_top: 0.0,
        footer_height: 0.0,
        sections: vec![
            SectionLayout { id: Some("intro".into()), label: None, height: 400.0, width: None },
            SectionLayout { id: None, label: Some("Orphan".into()), height: 400.0, width: None },
            SectionLayout { id: Some("outro".into()), label: Some("  ".into()), height: 400.0, width: None },
        ],
    };
    let controller = mounted(&layout);
    let labels: Vec<&str> = controller.links().iter().map(|link| link.label.as_str()).collect();
    assert_eq!(labels, vec!["Home", "intro", "outro"]);
}

#[test]
fn building_twice_is_rejected() {
    let mut controller = mounted(&landing_layout());
    assert!(matches!(controller.build_menu(), Err(NavError::AlreadyBuilt)));
    assert!(matches!(controller.create_scroll_up(), Err(NavError::AlreadyBuilt)));
    assert_eq!(controller.links().len(), 5);
}

#[test]
fn missing_menu_container_is_reported() {
    let view = MemoryView::new(desktop());
    let mut controller = NavController::new(view, NavConfig::default()).unwrap();
    let err = controller.build_menu().unwrap_err();
    assert!(matches!(err, NavError::MissingElement(ref id) if id == "#navbar__list"));
}

#[test]
fn scroll_up_control_is_appended_to_body_hidden() {
    let controller = mounted(&landing_layout());
    let view = controller.view();

    let container = view.element_by_id("scroll-up").unwrap();
    assert_eq!(view.parent(container), Some(view.body_id()));
    assert_eq!(view.style(container, "opacity").as_deref(), Some("0"));
    assert_eq!(view.style(container, "visibility").as_deref(), Some("hidden"));

    let link = view.children(container)[0];
    assert_eq!(view.attribute(&link, "href").as_deref(), Some("#top"));
    assert!(view.has_class(&link, "scroll-link"));
    assert_eq!(view.text(link), "UP");
}

#[test]
fn clicking_a_link_scrolls_and_activates_only_that_link() {
    let mut controller = mounted(&landing_layout());
    controller.handle_link_click("#section3").unwrap();

    let view = controller.view();
    let requests = view.scroll_requests();
    let last = requests.last().unwrap();
    assert_eq!(last.target.as_deref(), Some("section3"));
    assert_eq!(last.behavior, ScrollBehavior::Smooth);
    assert_eq!(view.scroll_offset(), 1700.0);

    for link in controller.links() {
        let expected = link.target == NavTarget::Section("section3".into());
        assert_eq!(view.has_class(&link.element, "active"), expected, "{:?}", link.target);
    }
    assert_eq!(controller.active_link(), Some(&NavTarget::Section("section3".into())));
}

#[test]
fn clicking_home_returns_to_top() {
    let mut controller = mounted(&landing_layout());
    controller.handle_link_click("#section4").unwrap();
    controller.handle_link_click("#top").unwrap();

    assert_eq!(controller.view().scroll_offset(), 0.0);
    assert_eq!(controller.active_link(), Some(&NavTarget::Home));
}

#[test]
fn clicking_unknown_target_keeps_state() {
    let mut controller = mounted(&landing_layout());
    let err = controller.handle_link_click("#missing").unwrap_err();
    assert!(matches!(err, NavError::MissingElement(ref id) if id == "#missing"));
    assert!(controller.handle_link_click("not-an-anchor").is_err());

    assert_eq!(controller.active_link(), Some(&NavTarget::Home));
    assert!(controller.view().scroll_requests().is_empty());
}

#[test]
fn scroll_up_button_scrolls_without_touching_links() {
    let mut controller = mounted(&landing_layout());
    controller.handle_link_click("#section2").unwrap();
    controller.scroll_to_top().unwrap();

    assert_eq!(controller.view().scroll_offset(), 0.0);
    assert_eq!(controller.active_link(), Some(&NavTarget::Section("section2".into())));
}

#[test]
fn page_with_existing_menu_is_not_built_again() {
    let config = NavConfig::default();
    let view = MemoryView::from_layout(&landing_layout(), &config).unwrap();
    let leftover = view.append_new(view.body_id(), "a").unwrap();
    view.set_attribute(&leftover, "id", "link_top").unwrap();

    let mut controller = NavController::new(view, config).unwrap();
    assert!(matches!(controller.build_menu(), Err(NavError::AlreadyBuilt)));

    let view = controller.view();
    let container = view.element_by_id("navbar__list").unwrap();
    assert!(view.children(container).is_empty());
    assert!(controller.links().is_empty());
}

#[test]
fn page_with_existing_scroll_up_control_is_not_given_another() {
    let config = NavConfig::default();
    let view = MemoryView::from_layout(&landing_layout(), &config).unwrap();
    let leftover = view.append_new(view.body_id(), "div").unwrap();
    view.set_attribute(&leftover, "id", "scroll-up").unwrap();

    let mut controller = NavController::new(view, config).unwrap();
    assert!(matches!(controller.create_scroll_up(), Err(NavError::AlreadyBuilt)));
    assert_eq!(controller.view().query_all("#scroll-up").unwrap().len(), 1);
}

#[test]
fn failed_build_leaves_container_empty() {
    let config = NavConfig {
        link_class: "menu link".to_string(),
        ..NavConfig::default()
    };
    let view = MemoryView::from_layout(&landing_layout(), &config).unwrap();
    let mut controller = NavController::new(view, config).unwrap();

    assert!(matches!(controller.build_menu(), Err(NavError::Dom(_))));
    let view = controller.view();
    let container = view.element_by_id("navbar__list").unwrap();
    assert!(view.children(container).is_empty());
    assert!(view.element_by_id("link_top").is_none());
}

#[test]
fn instant_scroll_when_smooth_scroll_is_off() {
    let config = NavConfig {
        smooth_scroll: false,
        ..NavConfig::default()
    };
    let view = MemoryView::from_layout(&landing_layout(), &config).unwrap();
    let mut controller = NavController::new(view, config).unwrap();
    controller.mount().unwrap();

    controller.handle_link_click("#section2").unwrap();
    let requests = controller.view().scroll_requests();
    assert_eq!(requests.last().unwrap().behavior, ScrollBehavior::Instant);
    assert_eq!(controller.view().scroll_offset(), 1100.0);
}
