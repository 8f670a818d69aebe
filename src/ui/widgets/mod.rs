pub mod form;

pub use form::{draw_form, Form, FormField};
