//! ETU Moodle (`vec.etu.ru/moodle`).

use super::login_form::LoginForm;
use pagekit::{
    Button, Checkbox, Element, Link, Locator, Page, PageObject, Session, TextInput, UiResult,
    Variant, XPathBuilder,
};

/// Login form URL
pub const LOGIN_URL: &str = "https://vec.etu.ru/moodle/login/";
/// Dashboard URL
pub const MAIN_URL: &str = "https://vec.etu.ru/moodle/";

/// Username and password sign-in
#[derive(Debug, Clone)]
pub struct LoginPageMoodle {
    page: Page,
    form: LoginForm,
}

impl LoginPageMoodle {
    /// Declare the page; nothing is resolved yet
    #[must_use]
    pub fn new(session: &Session) -> Self {
        let page = Page::with_main_element(session, LOGIN_URL, &Button::by_id(session, "loginbtn"));
        let form = LoginForm {
            username: TextInput::by_attribute(session, "autocomplete", "username"),
            password: TextInput::by_attribute(session, "autocomplete", "current-password"),
            submit: Button::by_text(session, "Вход"),
            remember: Checkbox::by_contains_name(session, "remember"),
            error: Element::new(
                session,
                XPathBuilder::create("div").contains_text("Неверный").build(),
            ),
        };
        Self { page, form }
    }

    /// Type the username
    pub fn enter_username(&self, username: &str) -> UiResult<()> {
        self.form.enter_username(username)
    }

    /// Type the password; events carry no value
    pub fn enter_password(&self, password: &str) -> UiResult<()> {
        self.form.enter_password(password)
    }

    /// Submit the form
    pub fn click_login_button(&self) -> UiResult<()> {
        self.form.submit()
    }

    /// Fill both fields and submit
    pub fn login(&self, username: &str, password: &str) -> UiResult<()> {
        self.form.login(username, password)
    }

    /// Wait for the "invalid login" message
    pub fn is_error_message_displayed(&self) -> UiResult<()> {
        self.form.error_is_displayed()
    }

    /// Text of the error message, once shown
    pub fn error_message(&self) -> UiResult<String> {
        self.form.error_message()
    }

    /// Check "remember username"; a box already checked is left alone
    pub fn click_remember_checkbox(&self) -> UiResult<()> {
        self.form.check_remember()
    }

    /// Current "remember username" state
    pub fn remember_checkbox_is_checked(&self) -> UiResult<bool> {
        self.form.remember.is_checked()
    }

    /// Wait until "remember username" is checked
    pub fn remember_should_be_checked(&self) -> UiResult<()> {
        self.form.remember.should_be_checked()
    }

    /// Wait until "remember username" is unchecked
    pub fn remember_should_not_be_checked(&self) -> UiResult<()> {
        self.form.remember.should_not_be_checked()
    }
}

impl PageObject for LoginPageMoodle {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

/// Dashboard shown after login
#[derive(Debug, Clone)]
pub struct MainPageMoodle {
    page: Page,
    action_menu: Link,
    admin_link: Link,
}

impl MainPageMoodle {
    /// Declare the page; nothing is resolved yet
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            page: Page::new(
                session,
                MAIN_URL,
                Locator::xpath(r#"//h5[@id="instance-15219-header"]"#),
            ),
            action_menu: Link::by_id(session, "action-menu-toggle-1"),
            admin_link: Link::by_contains_attribute(session, "data-title", "admin"),
        }
    }

    /// Open the user menu in the header
    pub fn open_action_menu(&self) -> UiResult<()> {
        self.action_menu.click()
    }

    /// Follow the site administration link
    pub fn open_admin(&self) -> UiResult<()> {
        self.admin_link.click()
    }
}

impl PageObject for MainPageMoodle {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}
