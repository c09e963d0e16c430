use folio_protocol::{DomCommand, ElementId};

use crate::config::MenuConfig;

/// Where a document click landed relative to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickOrigin {
    pub inside_trigger: bool,
    pub inside_menu: bool,
}

impl ClickOrigin {
    pub fn outside() -> Self {
        Self::default()
    }

    pub fn is_outside(&self) -> bool {
        !self.inside_trigger && !self.inside_menu
    }
}

/// Collapsible mobile navigation.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    config: MenuConfig,
    menu: ElementId,
    icon: Option<ElementId>,
    open: bool,
}

impl MobileMenu {
    pub fn new(config: MenuConfig, menu: ElementId, icon: Option<ElementId>, open: bool) -> Self {
        Self {
            config,
            menu,
            icon,
            open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Trigger clicked.
    pub fn toggle(&mut self) -> Vec<DomCommand> {
        if self.open { self.close() } else { self.show() }
    }

    /// Any click on the document. Closes the menu when it landed outside both
    /// the trigger and the menu.
    pub fn on_document_click(&mut self, origin: ClickOrigin) -> Vec<DomCommand> {
        if origin.is_outside() {
            self.close()
        } else {
            Vec::new()
        }
    }

    pub fn close(&mut self) -> Vec<DomCommand> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        let mut commands = vec![DomCommand::AddClass {
            target: self.menu,
            class: self.config.hidden_class.clone(),
        }];
        commands.extend(self.swap_icon(&self.config.icon_open_class, &self.config.icon_closed_class));
        commands
    }

    fn show(&mut self) -> Vec<DomCommand> {
        self.open = true;
        let mut commands = vec![DomCommand::RemoveClass {
            target: self.menu,
            class: self.config.hidden_class.clone(),
        }];
        commands.extend(self.swap_icon(&self.config.icon_closed_class, &self.config.icon_open_class));
        commands
    }

    fn swap_icon(&self, from: &str, to: &str) -> Vec<DomCommand> {
        let Some(icon) = self.icon else {
            return Vec::new();
        };
        vec![
            DomCommand::RemoveClass {
                target: icon,
                class: from.to_string(),
            },
            DomCommand::AddClass {
                target: icon,
                class: to.to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: ElementId = ElementId(2);
    const ICON: ElementId = ElementId(3);

    fn hidden_menu() -> MobileMenu {
        MobileMenu::new(MenuConfig::default(), MENU, Some(ICON), false)
    }

    #[test]
    fn toggle_shows_then_hides() {
        let mut m = hidden_menu();

        let cmds = m.toggle();
        assert!(m.is_open());
        assert!(cmds.contains(&DomCommand::RemoveClass {
            target: MENU,
            class: "hidden".into()
        }));
        assert!(cmds.contains(&DomCommand::AddClass {
            target: ICON,
            class: "fa-times".into()
        }));

        let cmds = m.toggle();
        assert!(!m.is_open());
        assert!(cmds.contains(&DomCommand::AddClass {
            target: MENU,
            class: "hidden".into()
        }));
        assert!(cmds.contains(&DomCommand::AddClass {
            target: ICON,
            class: "fa-bars".into()
        }));
    }

    #[test]
    fn outside_click_closes_open_menu() {
        let mut m = hidden_menu();
        m.toggle();
        assert!(!m.on_document_click(ClickOrigin::outside()).is_empty());
        assert!(!m.is_open());
    }

    #[test]
    fn inside_clicks_keep_menu_open() {
        let mut m = hidden_menu();
        m.toggle();
        let inside_menu = ClickOrigin {
            inside_trigger: false,
            inside_menu: true,
        };
        let on_trigger = ClickOrigin {
            inside_trigger: true,
            inside_menu: false,
        };
        assert!(m.on_document_click(inside_menu).is_empty());
        assert!(m.on_document_click(on_trigger).is_empty());
        assert!(m.is_open());
    }

    #[test]
    fn outside_click_on_closed_menu_is_noop() {
        let mut m = hidden_menu();
        assert!(m.on_document_click(ClickOrigin::outside()).is_empty());
    }

    #[test]
    fn works_without_icon() {
        let mut m = MobileMenu::new(MenuConfig::default(), MENU, None, false);
        assert_eq!(m.toggle().len(), 1);
    }
}
