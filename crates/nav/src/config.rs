//! Selectors, class names and tolerance used by the scroll navigation.

use crate::error::NavError;
use serde::Deserialize;

/// Look-ahead in pixels: a section counts as current slightly before it
/// reaches the top of the viewport.
pub const DEFAULT_TOLERANCE: i32 = 100;

/// Configuration for locating navigation elements and marking state.
///
/// Every field has a default matching the stock site theme, so a partial
/// object (for example `{"tolerance": 60}` passed from JavaScript) is enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    /// Id of the element containing the page sections.
    pub content_id: String,
    /// Selector for page sections inside the content element.
    pub page_selector: String,
    /// Id of the navigation menu element.
    pub menu_id: String,
    /// Selector for navigation links inside the menu.
    pub link_selector: String,
    /// Id of the button that opens and closes the mobile menu.
    pub toggle_button_id: String,
    /// Class marking the link of the section in view.
    pub active_class: String,
    /// Class marking the menu as open.
    pub visible_class: String,
    pub tolerance: i32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            content_id: "content".to_string(),
            page_selector: ".page".to_string(),
            menu_id: "nav-menu".to_string(),
            link_selector: ".menu-list a".to_string(),
            toggle_button_id: "toggle-menu-button".to_string(),
            active_class: "active".to_string(),
            visible_class: "show".to_string(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl NavConfig {
    /// Reject configurations that could never match anything.
    pub fn validate(&self) -> Result<(), NavError> {
        let required = [
            ("contentId", &self.content_id),
            ("pageSelector", &self.page_selector),
            ("menuId", &self.menu_id),
            ("linkSelector", &self.link_selector),
            ("toggleButtonId", &self.toggle_button_id),
            ("activeClass", &self.active_class),
            ("visibleClass", &self.visible_class),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(NavError::Config(format!("'{name}' must not be empty")));
            }
        }
        for (name, class) in [
            ("activeClass", &self.active_class),
            ("visibleClass", &self.visible_class),
        ] {
            if class.chars().any(char::is_whitespace) {
                return Err(NavError::Config(format!(
                    "'{name}' must be a single class name, got '{class}'"
                )));
            }
        }
        if self.tolerance < 0 {
            return Err(NavError::Config(format!(
                "'tolerance' must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_theme() {
        let config = NavConfig::default();
        assert_eq!(config.content_id, "content");
        assert_eq!(config.page_selector, ".page");
        assert_eq!(config.menu_id, "nav-menu");
        assert_eq!(config.link_selector, ".menu-list a");
        assert_eq!(config.toggle_button_id, "toggle-menu-button");
        assert_eq!(config.active_class, "active");
        assert_eq!(config.visible_class, "show");
        assert_eq!(config.tolerance, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: NavConfig =
            serde_json::from_str(r#"{"tolerance": 60, "menuId": "sidebar"}"#).unwrap();
        assert_eq!(config.tolerance, 60);
        assert_eq!(config.menu_id, "sidebar");
        assert_eq!(config.content_id, "content");
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = NavConfig {
            menu_id: "  ".to_string(),
            ..NavConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("menuId"));
    }

    #[test]
    fn test_validate_rejects_multi_word_class() {
        let config = NavConfig {
            active_class: "is active".to_string(),
            ..NavConfig::default()
        };
        assert!(matches!(config.validate(), Err(NavError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let config = NavConfig {
            tolerance: -1,
            ..NavConfig::default()
        };
        assert!(matches!(config.validate(), Err(NavError::Config(_))));
    }
}
