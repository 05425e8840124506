//! Page objects for the ETU identity portal, the ETU Moodle and the hh.ru job
//! board, built on [`pagekit`].
//!
//! Every page is pure composition: a [`pagekit::Page`] for the load contract
//! plus the typed elements its workflows touch.
//!
//! ```ignore
//! use pagekit::prelude::*;
//! use pagekit_sites::{HomePageLeti, LoginPageLeti};
//!
//! let mut login = LoginPageLeti::new(&session);
//! login.open_page()?;
//! login.login(settings.credentials.email()?, settings.credentials.password()?)?;
//! HomePageLeti::new(&session).wait_for_page_to_load()?;
//! ```

#![warn(missing_docs)]

mod data_qa;
pub mod pages;

pub use data_qa::DataQa;
pub use pages::hh::{MainPageHh, SearchPageHh};
pub use pages::leti::{HomePageLeti, LoginPageLeti};
pub use pages::moodle::{LoginPageMoodle, MainPageMoodle};
