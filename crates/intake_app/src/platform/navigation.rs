use intake_logging::intake_info;

/// Whatever shows the view that follows a successful upload.
pub trait Navigator {
    fn navigate_next(&mut self);
}

/// Announces the next view on the terminal.
pub struct TerminalNavigator {
    next_view: String,
}

impl TerminalNavigator {
    pub fn new(next_view: impl Into<String>) -> Self {
        Self {
            next_view: next_view.into(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate_next(&mut self) {
        intake_info!("handing off to {}", self.next_view);
        println!("Continuing to {}", self.next_view);
    }
}
