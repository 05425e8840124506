//! ETU identity portal (`id.etu.ru`).

use super::login_form::LoginForm;
use pagekit::{
    Button, Checkbox, Condition, Element, Link, Page, PageObject, Session, TextInput, UiResult,
    Variant, XPathBuilder,
};

/// Login form URL
pub const LOGIN_URL: &str = "https://id.etu.ru/login";
/// Landing page after a successful login
pub const HOME_URL: &str = "https://id.etu.ru/";

/// Email and password sign-in
#[derive(Debug, Clone)]
pub struct LoginPageLeti {
    page: Page,
    form: LoginForm,
}

impl LoginPageLeti {
    /// Declare the page; nothing is resolved yet
    #[must_use]
    pub fn new(session: &Session) -> Self {
        let submit = Button::by_contains_class(session, "btn-primary");
        let page = Page::with_main_element(session, LOGIN_URL, &submit);
        let form = LoginForm {
            username: TextInput::by_name(session, "email"),
            password: TextInput::by_name(session, "password"),
            submit,
            remember: Checkbox::by_id(session, "remember"),
            error: Element::new(
                session,
                XPathBuilder::create("span")
                    .contains_attribute("class", "text-error")
                    .build(),
            ),
        };
        Self { page, form }
    }

    /// Type the email
    pub fn enter_username(&self, email: &str) -> UiResult<()> {
        self.form.enter_username(email)
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
    pub fn login(&self, email: &str, password: &str) -> UiResult<()> {
        self.form.login(email, password)
    }

    /// Wait for the "wrong credentials" message
    pub fn is_error_message_displayed(&self) -> UiResult<()> {
        self.form.error_is_displayed()
    }

    /// Text of the error message, once shown
    pub fn error_message(&self) -> UiResult<String> {
        self.form.error_message()
    }

    /// Check "remember me"; a box already checked is left alone
    pub fn click_remember_checkbox(&self) -> UiResult<()> {
        self.form.check_remember()
    }

    /// Current "remember me" state
    pub fn remember_checkbox_is_checked(&self) -> UiResult<bool> {
        self.form.remember.is_checked()
    }

    /// Wait until "remember me" is checked
    pub fn remember_should_be_checked(&self) -> UiResult<()> {
        self.form.remember.should_be_checked()
    }

    /// Wait until "remember me" is unchecked
    pub fn remember_should_not_be_checked(&self) -> UiResult<()> {
        self.form.remember.should_not_be_checked()
    }
}

impl PageObject for LoginPageLeti {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

/// Account home, shown after login
#[derive(Debug, Clone)]
pub struct HomePageLeti {
    page: Page,
    dropdown: Element,
    logout_button: Button,
    cabinet_link: Link,
}

impl HomePageLeti {
    /// Declare the page; nothing is resolved yet
    #[must_use]
    pub fn new(session: &Session) -> Self {
        let personal = Link::by_href(session, "/personal");
        Self {
            page: Page::with_main_element(session, HOME_URL, &personal),
            dropdown: Element::new(
                session,
                XPathBuilder::create("div")
                    .contains_attribute("class", "dropdown-bottom")
                    .build(),
            ),
            logout_button: Button::by_text(session, " Выйти"),
            cabinet_link: Link::by_contains_href(session, "https://lk.etu.ru/?"),
        }
    }

    /// Open the account menu holding the logout entry
    pub fn open_dropdown_menu(&self) -> UiResult<()> {
        self.dropdown.click_when(&Condition::Visible)
    }

    /// Open the account menu and log out
    pub fn logout(&self) -> UiResult<()> {
        self.open_dropdown_menu()?;
        self.logout_button.click()
    }

    /// Follow the link to the student cabinet
    pub fn open_cabinet(&self) -> UiResult<()> {
        self.cabinet_link.click()
    }
}

impl PageObject for HomePageLeti {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}
