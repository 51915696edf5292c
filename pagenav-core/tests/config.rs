use pagenav_core::{
    header_visibility, scroll_up_visibility, NavConfig, NavError, NavTarget, Rect, Viewport,
    Visibility,
};

#[test]
fn default_config_matches_landing_page_markup() {
    let config = NavConfig::default();
    assert_eq!(config.menu_container_id, "navbar__list");
    assert_eq!(config.header_selector, ".page__header");
    assert_eq!(config.home_threshold, 350.0);
    assert_eq!(config.scroll_up_threshold, 400.0);
    assert_eq!(config.header_threshold, 600.0);
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_bad_thresholds_and_empty_ids() {
    let negative = NavConfig {
        header_threshold: -1.0,
        ..NavConfig::default()
    };
    assert!(matches!(negative.validate(), Err(NavError::Config(_))));

    let nan = NavConfig {
        scroll_up_threshold: f64::NAN,
        ..NavConfig::default()
    };
    assert!(nan.validate().is_err());

    let empty = NavConfig {
        active_class: " ".to_string(),
        ..NavConfig::default()
    };
    assert!(matches!(empty.validate(), Err(NavError::Config(msg)) if msg.contains("active_class")));
}

#[test]
fn href_parsing_maps_home_anchor() {
    assert_eq!(NavTarget::from_href("#top", "top"), Some(NavTarget::Home));
    assert_eq!(
        NavTarget::from_href("#section2", "top"),
        Some(NavTarget::Section("section2".to_string()))
    );
    assert_eq!(NavTarget::from_href("#", "top"), None);
    assert_eq!(NavTarget::from_href("section2", "top"), None);
    assert_eq!(NavTarget::Home.href("top"), "#top");
}

#[test]
fn viewport_containment_needs_all_four_edges() {
    let viewport = Viewport { width: 1000.0, height: 700.0 };
    let inside = Rect { top: 0.0, left: 0.0, bottom: 700.0, right: 1000.0 };
    assert!(viewport.contains(&inside));
    assert!(!viewport.contains(&Rect { top: -1.0, ..inside }));
    assert!(!viewport.contains(&Rect { left: -0.5, ..inside }));
    assert!(!viewport.contains(&Rect { bottom: 700.5, ..inside }));
    assert!(!viewport.contains(&Rect { right: 1001.0, ..inside }));
}

#[test]
fn visibility_rules_follow_thresholds() {
    assert_eq!(scroll_up_visibility(400.0, 400.0), Visibility::Hidden);
    assert_eq!(scroll_up_visibility(400.1, 400.0), Visibility::Visible);

    assert_eq!(header_visibility(700.0, 650.0, 600.0), Visibility::Hidden);
    assert_eq!(header_visibility(700.0, 750.0, 600.0), Visibility::Visible);
    assert_eq!(header_visibility(590.0, 100.0, 600.0), Visibility::Visible);
    assert_eq!(Visibility::Hidden.opacity(), "0");
    assert_eq!(Visibility::Visible.css_value(), "visible");
}

#[test]
fn config_serializes_with_field_names() {
    let value = serde_json::to_value(NavConfig::default()).unwrap();
    assert_eq!(value["home_id"], "top");
    let back: NavConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, NavConfig::default());
}
