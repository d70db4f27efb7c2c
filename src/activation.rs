use std::io::Write;

/// Brings the application panel to the user's attention
pub trait Activator {
    fn request_activate(&mut self);
}

/// Terminal activator: rings the bell when enabled, otherwise only logs
#[derive(Debug, Clone, Default)]
pub struct TerminalActivator {
    pub bell: bool,
}

impl TerminalActivator {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl Activator for TerminalActivator {
    fn request_activate(&mut self) {
        tracing::debug!(bell = self.bell, "panel activation requested");
        if self.bell {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}

/// Counts activation requests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct CountingActivator {
    pub count: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl Activator for CountingActivator {
    fn request_activate(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}
