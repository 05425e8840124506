//! Concrete pages, one module per site.

pub mod hh;
pub mod leti;
mod login_form;
pub mod moodle;
