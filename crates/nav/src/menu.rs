/// Visibility of the mobile navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    /// State matching whether the menu currently carries the visible class.
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    /// Toggle-button click.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    /// Click inside the content area.
    #[must_use]
    pub fn closed(self) -> Self {
        MenuState::Closed
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_closed() {
        assert_eq!(MenuState::default(), MenuState::Closed);
        assert!(!MenuState::default().is_open());
    }

    #[test]
    fn test_toggle_once_opens() {
        assert_eq!(MenuState::Closed.toggled(), MenuState::Open);
    }

    #[test]
    fn test_toggle_twice_restores() {
        assert_eq!(MenuState::Closed.toggled().toggled(), MenuState::Closed);
        assert_eq!(MenuState::Open.toggled().toggled(), MenuState::Open);
    }

    #[test]
    fn test_from_visible() {
        assert_eq!(MenuState::from_visible(true), MenuState::Open);
        assert_eq!(MenuState::from_visible(false), MenuState::Closed);
    }

    #[test]
    fn test_close_from_either_state() {
        assert_eq!(MenuState::Open.closed(), MenuState::Closed);
        assert_eq!(MenuState::Closed.closed(), MenuState::Closed);
    }
}
