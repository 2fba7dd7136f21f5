//! Action buttons next to the search box.

/// A button in the action bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start creating a new learning pod.
    CreatePod,
    /// Open the feedback modal.
    Feedback,
}

impl Action {
    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Action::CreatePod => "Create Pod",
            Action::Feedback => "Send Feedback",
        }
    }

    /// Keyboard shortcut.
    pub fn shortcut(self) -> char {
        match self {
            Action::CreatePod => 'n',
            Action::Feedback => 'f',
        }
    }
}

/// Row of action buttons with a keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBar {
    actions: Vec<Action>,
    focused: usize,
}

impl Default for ActionBar {
    fn default() -> Self {
        Self {
            actions: vec![Action::CreatePod, Action::Feedback],
            focused: 0,
        }
    }
}

impl ActionBar {
    /// The standard bar: Create Pod, then Send Feedback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons in display order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Focused button.
    pub fn focused(&self) -> Action {
        self.actions[self.focused]
    }

    /// Move focus right, wrapping around.
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.actions.len();
    }

    /// Move focus left, wrapping around.
    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.actions.len() - 1) % self.actions.len();
    }

    /// Press the focused button.
    pub fn activate(&self) -> Action {
        self.focused()
    }

    /// Action bound to shortcut `key`, if any.
    pub fn shortcut(&self, key: char) -> Option<Action> {
        self.actions.iter().copied().find(|a| a.shortcut() == key)
    }
}
