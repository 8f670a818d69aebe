//! Fleet page - the car dialog and its save flow

pub mod controller;
pub mod dialog;

pub use controller::{
    prepare, reconcile, FormSubmitController, SubmitError, ViewHandle, SAVE_FAILED_MESSAGE,
};
pub use dialog::CarDialog;
