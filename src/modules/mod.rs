//! UI Modules
//!
//! Each page implements the Module trait and handles its own key input and
//! rendering:
//! - tasks: status tabs over the task list with local check boxes
//! - calendar: day grid with the current-time line
//! - fleet: the car dialog and its save flow

pub mod calendar;
pub mod fleet;
pub mod tasks;

pub use calendar::DayCalendar;
pub use fleet::{CarDialog, FormSubmitController, ViewHandle};
pub use tasks::{TaskBoard, TaskTab};
