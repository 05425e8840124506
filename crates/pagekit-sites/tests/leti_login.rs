//! Login scenarios against the identity portal replica.

#![allow(clippy::unwrap_used)]

mod common;

use common::{leti_site, open_session, settings};
use pagekit::{BrowserDriver, EventKind, MockDriver, PageObject, PageState, UiError};
use pagekit_sites::pages::leti::{HOME_URL, LOGIN_URL};
use pagekit_sites::{HomePageLeti, LoginPageLeti};
use std::sync::Arc;
use std::time::Duration;

fn site() -> Arc<MockDriver> {
    let credentials = settings().credentials;
    leti_site::build(credentials.email().unwrap(), credentials.password().unwrap())
}

#[test]
fn test_login_with_valid_credentials_reaches_home() {
    let driver = site();
    let (_scope, session, sink) = open_session(&driver);
    let credentials = settings().credentials;

    let mut login = LoginPageLeti::new(&session);
    assert_eq!(login.state(), PageState::Unopened);
    login.open_page().unwrap();
    login.is_displayed().unwrap();
    assert_eq!(login.state(), PageState::Loaded);

    login
        .login(credentials.email().unwrap(), credentials.password().unwrap())
        .unwrap();

    let mut home = HomePageLeti::new(&session);
    home.wait_for_page_to_load().unwrap();
    assert_eq!(home.state(), PageState::Loaded);
    assert_eq!(driver.current_url().unwrap(), HOME_URL);

    let password = credentials.password().unwrap();
    assert!(sink
        .events()
        .iter()
        .all(|e| e.detail.as_deref() != Some(password)));
    assert_eq!(sink.count(EventKind::ValueSet), 2);
}

#[test]
fn test_invalid_password_shows_error() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);
    let email = settings().credentials.email().unwrap().to_string();

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();
    login.login(&email, "not-the-password").unwrap();

    login.is_error_message_displayed().unwrap();
    assert_eq!(login.error_message().unwrap(), "Неверный email или пароль");

    let mut home = HomePageLeti::new(&session);
    let err = home
        .wait_for_page_to_load_within(Duration::from_millis(20))
        .unwrap_err();
    assert!(matches!(err, UiError::Timeout { .. }));
    assert_eq!(home.state(), PageState::Loading);
    assert_eq!(driver.current_url().unwrap(), LOGIN_URL);
}

#[test]
fn test_invalid_email_shows_error() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);
    let password = settings().credentials.password().unwrap().to_string();

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();
    login.login("nobody@stud.etu.ru", &password).unwrap();

    login.is_error_message_displayed().unwrap();
}

#[test]
fn test_empty_fields_keep_login_page() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();
    login.click_login_button().unwrap();

    login.is_displayed().unwrap();
    assert_eq!(driver.current_url().unwrap(), LOGIN_URL);
}

#[test]
fn test_remember_checkbox_gets_checked() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();

    login.remember_should_not_be_checked().unwrap();
    login.click_remember_checkbox().unwrap();
    login.remember_should_be_checked().unwrap();
    assert!(login.remember_checkbox_is_checked().unwrap());
    assert_eq!(driver.clicks(leti_site::REMEMBER), 1);
}

#[test]
fn test_remember_checkbox_stays_checked_on_repeat() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();

    login.click_remember_checkbox().unwrap();
    login.click_remember_checkbox().unwrap();
    assert!(login.remember_checkbox_is_checked().unwrap());
    assert_eq!(driver.clicks(leti_site::REMEMBER), 1);
}

#[test]
fn test_logout_returns_to_login() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);
    let credentials = settings().credentials;

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();
    login
        .login(credentials.email().unwrap(), credentials.password().unwrap())
        .unwrap();

    let mut home = HomePageLeti::new(&session);
    home.wait_for_page_to_load().unwrap();
    home.logout().unwrap();

    login.wait_for_page_to_load().unwrap();
    assert_eq!(driver.clicks(leti_site::DROPDOWN), 1);
    assert_eq!(driver.current_url().unwrap(), LOGIN_URL);
}

#[test]
fn test_cabinet_link_leaves_for_student_cabinet() {
    let driver = site();
    let (_scope, session, _) = open_session(&driver);
    let credentials = settings().credentials;

    let mut login = LoginPageLeti::new(&session);
    login.open_page().unwrap();
    login
        .login(credentials.email().unwrap(), credentials.password().unwrap())
        .unwrap();

    let mut home = HomePageLeti::new(&session);
    home.wait_for_page_to_load().unwrap();
    home.open_cabinet().unwrap();
    assert_eq!(driver.clicks(leti_site::CABINET), 1);
    assert_eq!(driver.current_url().unwrap(), leti_site::CABINET_URL);
}

#[test]
fn test_session_closes_with_scope() {
    let driver = site();
    let (scope, session, _) = open_session(&driver);
    LoginPageLeti::new(&session).open_page().unwrap();

    drop(scope);
    assert!(driver.is_closed());
}
