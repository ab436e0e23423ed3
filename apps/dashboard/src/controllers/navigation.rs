use crate::controllers::helpers::{cycle_next, cycle_previous};

/// Receives the section id whenever a navigation link is selected.
pub trait SectionHook {
    fn navigate(&mut self, section: &str);
}

/// Default hook: there is no local view switching, so selections are only logged.
#[derive(Debug, Default)]
pub struct LoggingSectionHook;

impl SectionHook for LoggingSectionHook {
    fn navigate(&mut self, section: &str) {
        tracing::info!(section, "navigate to section");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub target: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            target: target.to_string(),
            active: false,
        }
    }

    /// `#climate` -> `climate`
    pub fn section_id(&self) -> &str {
        self.target.trim_start_matches('#')
    }
}

pub fn default_links() -> Vec<NavLink> {
    let mut links = vec![
        NavLink::new("Dashboard", "#dashboard"),
        NavLink::new("Climate Data", "#climate"),
        NavLink::new("Risk Map", "#map"),
        NavLink::new("Analysis", "#analysis"),
        NavLink::new("Reports", "#reports"),
    ];
    links[0].active = true;
    links
}

pub struct NavigationController {
    links: Vec<NavLink>,
    mobile_menu_open: bool,
    hook: Box<dyn SectionHook>,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("links", &self.links)
            .field("mobile_menu_open", &self.mobile_menu_open)
            .finish_non_exhaustive()
    }
}

impl NavigationController {
    pub fn new(links: Vec<NavLink>, hook: Box<dyn SectionHook>) -> Self {
        Self {
            links,
            mobile_menu_open: false,
            hook,
        }
    }

    pub fn with_default_links(hook: Box<dyn SectionHook>) -> Self {
        Self::new(default_links(), hook)
    }

    /// Marks `index` as the only active link and forwards its section id to the hook.
    /// Returns `None` and leaves state untouched for an unknown index.
    pub fn select_link(&mut self, index: usize) -> Option<String> {
        if index >= self.links.len() {
            return None;
        }

        for link in &mut self.links {
            link.active = false;
        }
        self.links[index].active = true;

        let section = self.links[index].section_id().to_string();
        self.hook.navigate(&section);
        Some(section)
    }

    pub fn select_next(&mut self) -> Option<String> {
        let index = cycle_next(self.active_index().unwrap_or(0), self.links.len());
        self.select_link(index)
    }

    pub fn select_previous(&mut self) -> Option<String> {
        let index = cycle_previous(self.active_index().unwrap_or(0), self.links.len());
        self.select_link(index)
    }

    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        self.mobile_menu_open
    }

    pub fn active_index(&self) -> Option<usize> {
        self.links.iter().position(|link| link.active)
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub const fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }
}
