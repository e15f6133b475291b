use std::{cell::Cell, fmt::Display};

/// Represents a trait responsible for handling diagnostics.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive(&self, error: T);

    /// Whether any error has been received so far.
    fn has_received(&self) -> bool;
}

/// Prints every received error to stderr.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Display> Handler<T> for PrintHandler {
    fn receive(&self, error: T) {
        eprintln!("{error}");
        self.printed.set(true);
    }

    fn has_received(&self) -> bool {
        self.printed.get()
    }
}

/// Counts received errors without printing them.
#[derive(Debug, Default)]
pub struct SilentHandler {
    received: Cell<usize>,
}

impl SilentHandler {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors received.
    #[must_use]
    pub fn count(&self) -> usize {
        self.received.get()
    }
}

impl<T> Handler<T> for SilentHandler {
    fn receive(&self, _error: T) {
        self.received.set(self.received.get() + 1);
    }

    fn has_received(&self) -> bool {
        self.received.get() > 0
    }
}

/// Discards every received error.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive(&self, _error: T) {}

    fn has_received(&self) -> bool {
        false
    }
}
