// Licensed under the Apache-2.0 license

use std::cell::RefCell;
use std::rc::Rc;

/// A shared recorder for actions performed by "fake" Bus implementations in
/// unit tests. Clones all share the same underlying buffer, so a test can
/// keep a handle to the log after the fake itself has been moved into the
/// code under test.
///
/// # Example
///
/// ```
/// use ntrcard_emu_bus::testing::Log;
///
/// let log = Log::new();
/// let handle = log.clone();
/// log.push("write(Word, 0x4, 0x1)".into());
/// assert_eq!(handle.take(), vec!["write(Word, 0x4, 0x1)"]);
/// assert!(handle.take().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Log {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Log {
    /// Construct an empty `Log`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one action.
    pub fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Replaces the log contents with an empty list and returns the previous
    /// contents. Useful for writing assertions about recent actions.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}
