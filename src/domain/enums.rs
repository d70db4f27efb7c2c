/// Status of the pomodoro session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Stopped,
    Started,
    Paused,
}

impl TaskStatus {
    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stopped => "STOPPED",
            Self::Started => "RUNNING",
            Self::Paused => "PAUSED",
        }
    }
}

/// Which key handler is active in the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Normal,
    ContextMenu,
}

/// Page shown in the expanded panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Queue,
    Configure,
    About,
}

impl Page {
    /// Page that follows this one when cycling with Tab
    pub fn next(&self) -> Page {
        match self {
            Page::Queue => Page::Configure,
            Page::Configure => Page::About,
            Page::About => Page::Queue,
        }
    }
}
