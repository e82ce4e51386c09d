use std::cell::RefCell;

/// Fire-and-forget notification sink. Called once per received high-score
/// update; no acknowledgment, no delivery guarantee expected by the caller.
pub trait Notifier {
    fn notify(&self, content: &str);
}

/// In-app notifier: keeps the latest notification for the view to render as
/// a banner. Lives on the single-threaded event loop, hence `RefCell`.
#[derive(Debug, Default)]
pub struct Banner {
    current: RefCell<Option<String>>,
}

impl Banner {
    pub fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }
}

impl Notifier for Banner {
    fn notify(&self, content: &str) {
        *self.current.borrow_mut() = Some(content.to_owned());
    }
}

/// Collects every notification; test double.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: RefCell<Vec<String>>,
}

impl MemoryNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, content: &str) {
        self.messages.borrow_mut().push(content.to_owned());
    }
}
