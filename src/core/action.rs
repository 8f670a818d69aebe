//! Actions that modules return to communicate with the app

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Ask the view to open a placeholder modal by id
    ShowModal(&'static str),

    /// Open the car dialog
    OpenCarDialog,

    /// Submit the open car dialog
    SubmitCar,

    /// Close the open dialog without saving
    CloseDialog,

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
