//! Operator prompts the controllers need from the presentation layer.

use std::cell::RefCell;

/// Confirmation and notice capability injected into list and form
/// controllers.
pub trait Dialogs {
    /// Ask the operator a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;

    /// Show a transient notice.
    fn notify(&self, message: &str);
}

impl<D: Dialogs + ?Sized> Dialogs for &D {
    fn confirm(&self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }

    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Answers every confirmation the same way and keeps everything shown, for
/// headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordedDialogs {
    answer: bool,
    prompts: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
}

impl RecordedDialogs {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl Dialogs for RecordedDialogs {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}
