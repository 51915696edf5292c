use tracing::{debug, trace};

use crate::{
    header_visibility, scroll_up_visibility, NavConfig, NavError, NavTarget, ScrollBehavior,
    ScrollDirection, ScrollReport, View, Visibility,
};

/// Section đọc từ tài liệu khi khởi tạo controller.
#[derive(Debug, Clone)]
pub struct SectionNode<E> {
    pub id: String,
    pub label: String,
    pub element: E,
}

/// Một liên kết đã được chèn vào menu.
#[derive(Debug, Clone)]
pub struct MenuLink<E> {
    pub target: NavTarget,
    pub label: String,
    pub element: E,
}

/// Controller duy nhất giữ toàn bộ trạng thái điều hướng của trang.
pub struct NavController<V: View> {
    view: V,
    config: NavConfig,
    sections: Vec<SectionNode<V::Element>>,
    /// `true` khi section đầu tiên trong DOM có id và nằm ở `sections[0]`.
    first_section_kept: bool,
    links: Vec<MenuLink<V::Element>>,
    header: Option<V::Element>,
    scroll_up: Option<V::Element>,
    last_offset: f64,
    active_link: Option<NavTarget>,
    active_section: Option<String>,
}

impl<V: View> NavController<V> {
    /// Đọc các section và header từ `view`. Chưa thay đổi DOM.
    pub fn new(view: V, config: NavConfig) -> Result<Self, NavError> {
        config.validate()?;

        let mut sections = Vec::new();
        let mut first_section_kept = false;
        for (position, element) in view.query_all(&config.section_selector)?.into_iter().enumerate() {
            let Some(id) = view
                .attribute(&element, "id")
                .filter(|id| !id.trim().is_empty())
            else {
                debug!("bỏ qua section không có id");
                continue;
            };
            let label = view
                .attribute(&element, "data-nav")
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| id.clone());
            if position == 0 {
                first_section_kept = true;
            }
            sections.push(SectionNode { id, label, element });
        }

        let header = if config.header_selector.trim().is_empty() {
            None
        } else {
            view.query(&config.header_selector)?
        };

        debug!(
            sections = sections.len(),
            has_header = header.is_some(),
            "khởi tạo controller điều hướng"
        );

        Ok(Self {
            view,
            config,
            sections,
            first_section_kept,
            links: Vec::new(),
            header,
            scroll_up: None,
            last_offset: 0.0,
            active_link: None,
            active_section: None,
        })
    }

    /// Dựng menu rồi thêm nút cuộn lên đầu trang.
    pub fn mount(&mut self) -> Result<(), NavError> {
        self.build_menu()?;
        self.create_scroll_up()?;
        Ok(())
    }

    /// Chèn mục "Home" và một mục cho mỗi section vào container menu.
    ///
    /// Trang đã có liên kết `#link_<home_id>` (do một controller khác dựng)
    /// thì trả về [`NavError::AlreadyBuilt`].
    pub fn build_menu(&mut self) -> Result<&[MenuLink<V::Element>], NavError> {
        let home_link_id = format!("link_{}", self.config.home_id);
        if !self.links.is_empty() || self.view.element_by_id(&home_link_id).is_some() {
            return Err(NavError::AlreadyBuilt);
        }

        let container = self
            .view
            .element_by_id(&self.config.menu_container_id)
            .ok_or_else(|| NavError::MissingElement(format!("#{}", self.config.menu_container_id)))?;

        let mut entries = Vec::with_capacity(self.sections.len() + 1);
        entries.push((NavTarget::Home, self.config.home_label.clone()));
        entries.extend(
            self.sections
                .iter()
                .map(|section| (NavTarget::Section(section.id.clone()), section.label.clone())),
        );

        // Tạo đủ mọi mục trước khi gắn vào container, lỗi giữa chừng không để lại menu dở.
        let mut items = Vec::with_capacity(entries.len());
        let mut links = Vec::with_capacity(entries.len());
        for (target, label) in entries {
            let (item, link) = self.create_menu_item(&target, &label)?;
            items.push(item);
            links.push(MenuLink {
                target,
                label,
                element: link,
            });
        }
        for item in &items {
            self.view.append_child(&container, item)?;
        }
        self.links = links;

        // Mục "Home" sáng sẵn khi trang vừa tải.
        self.set_active_link(&NavTarget::Home)?;

        debug!(entries = self.links.len(), "đã dựng menu điều hướng");
        Ok(&self.links)
    }

    fn create_menu_item(
        &self,
        target: &NavTarget,
        label: &str,
    ) -> Result<(V::Element, V::Element), NavError> {
        let home_id = &self.config.home_id;
        let item = self.view.create_element("li")?;
        let link = self.view.create_element("a")?;
        self.view.set_attribute(&link, "href", &target.href(home_id))?;
        self.view
            .set_attribute(&link, "id", &format!("link_{}", target.element_id(home_id)))?;
        self.view.add_class(&link, &self.config.link_class)?;
        self.view.set_text(&link, label);
        self.view.append_child(&item, &link)?;
        Ok((item, link))
    }

    /// Thêm `<div id="scroll-up"><a class="scroll-link">` vào `<body>` và
    /// trả về phần tử `<a>` để gắn sự kiện click.
    pub fn create_scroll_up(&mut self) -> Result<V::Element, NavError> {
        if self.scroll_up.is_some() || self.view.element_by_id(&self.config.scroll_up_id).is_some() {
            return Err(NavError::AlreadyBuilt);
        }

        let body = self
            .view
            .body()
            .ok_or_else(|| NavError::MissingElement("body".to_string()))?;

        let container = self.view.create_element("div")?;
        self.view
            .set_attribute(&container, "id", &self.config.scroll_up_id)?;
        let link = self.view.create_element("a")?;
        self.view
            .add_class(&link, &self.config.scroll_up_link_class)?;
        self.view
            .set_attribute(&link, "href", &NavTarget::Home.href(&self.config.home_id))?;
        self.view.set_text(&link, &self.config.scroll_up_label);
        self.view.append_child(&container, &link)?;
        self.view.append_child(&body, &container)?;

        self.apply_visibility(&container, Visibility::Hidden)?;
        self.scroll_up = Some(container);
        Ok(link)
    }

    /// Click vào liên kết menu có `href` dạng `#id`.
    pub fn handle_link_click(&mut self, href: &str) -> Result<(), NavError> {
        let target = NavTarget::from_href(href, &self.config.home_id)
            .ok_or_else(|| NavError::MissingElement(href.to_string()))?;
        self.navigate_to(&target)
    }

    /// Cuộn tới đích và chỉ để liên kết của đích đó sáng.
    pub fn navigate_to(&mut self, target: &NavTarget) -> Result<(), NavError> {
        self.scroll_to(target)?;
        self.set_active_link(target)
    }

    /// Click vào nút cuộn lên đầu trang. Trạng thái sáng do sự kiện cuộn cập nhật.
    pub fn scroll_to_top(&self) -> Result<(), NavError> {
        self.scroll_to(&NavTarget::Home)
    }

    fn scroll_to(&self, target: &NavTarget) -> Result<(), NavError> {
        let id = target.element_id(&self.config.home_id);
        let element = self
            .view
            .element_by_id(id)
            .ok_or_else(|| NavError::MissingElement(format!("#{id}")))?;
        let behavior = if self.config.smooth_scroll {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        self.view.scroll_into_view(&element, behavior);
        Ok(())
    }

    /// Cập nhật trạng thái sáng, nút cuộn lên và header theo vị trí cuộn hiện tại.
    pub fn handle_scroll(&mut self) -> Result<ScrollReport, NavError> {
        let offset = self.view.scroll_offset();
        let viewport = self.view.viewport();
        let direction = ScrollDirection::between(self.last_offset, offset);

        let visible: Vec<usize> = self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, section)| viewport.contains(&self.view.bounding_rect(&section.element)))
            .map(|(index, _)| index)
            .collect();

        for index in visible {
            // Chỉ section đầu tiên của DOM mới nhường chỗ cho "Home".
            if index == 0 && self.first_section_kept && offset < self.config.home_threshold {
                self.set_active_link(&NavTarget::Home)?;
            } else {
                let target = NavTarget::Section(self.sections[index].id.clone());
                self.set_active_link(&target)?;
                self.set_active_section(&target)?;
            }
        }

        let scroll_up = match self.scroll_up.clone() {
            Some(element) => {
                let visibility = scroll_up_visibility(offset, self.config.scroll_up_threshold);
                self.apply_visibility(&element, visibility)?;
                Some(visibility)
            }
            None => None,
        };

        let header = match self.header.clone() {
            Some(element) => {
                let visibility =
                    header_visibility(offset, self.last_offset, self.config.header_threshold);
                self.apply_visibility(&element, visibility)?;
                Some(visibility)
            }
            None => None,
        };

        self.last_offset = offset;

        trace!(offset, ?direction, active = ?self.active_link, "xử lý sự kiện cuộn");

        Ok(ScrollReport {
            offset,
            direction,
            active_link: self.active_link.clone(),
            active_section: self.active_section.clone(),
            header,
            scroll_up,
        })
    }

    /// Bỏ class active khỏi mọi liên kết rồi gắn cho liên kết trỏ tới `target`.
    pub fn set_active_link(&mut self, target: &NavTarget) -> Result<(), NavError> {
        let mut matched = None;
        for link in &self.links {
            self.view.remove_class(&link.element, &self.config.active_class)?;
            if link.target == *target {
                self.view.add_class(&link.element, &self.config.active_class)?;
                matched = Some(link.target.clone());
            }
        }

        if matched != self.active_link {
            debug!(from = ?self.active_link, to = ?matched, "đổi liên kết đang sáng");
        }
        self.active_link = matched;
        Ok(())
    }

    /// Chỉ để section của `target` mang class active-section.
    /// `Home` ứng với section đầu tiên.
    pub fn set_active_section(&mut self, target: &NavTarget) -> Result<(), NavError> {
        let wanted = match target {
            NavTarget::Home => self.sections.first().map(|section| section.id.as_str()),
            NavTarget::Section(id) => Some(id.as_str()),
        };

        let mut matched = None;
        for section in &self.sections {
            self.view
                .remove_class(&section.element, &self.config.active_section_class)?;
            if Some(section.id.as_str()) == wanted {
                self.view
                    .add_class(&section.element, &self.config.active_section_class)?;
                matched = Some(section.id.clone());
            }
        }

        if matched != self.active_section {
            debug!(from = ?self.active_section, to = ?matched, "đổi section đang sáng");
        }
        self.active_section = matched;
        Ok(())
    }

    fn apply_visibility(&self, element: &V::Element, visibility: Visibility) -> Result<(), NavError> {
        self.view.set_style(element, "opacity", visibility.opacity())?;
        self.view
            .set_style(element, "visibility", visibility.css_value())
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn sections(&self) -> &[SectionNode<V::Element>] {
        &self.sections
    }

    /// Các liên kết menu theo thứ tự hiển thị, "Home" đứng đầu.
    pub fn links(&self) -> &[MenuLink<V::Element>] {
        &self.links
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    pub fn active_link(&self) -> Option<&NavTarget> {
        self.active_link.as_ref()
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }
}
