//! Mock replicas of the three sites and a fixture wired to them.

#![allow(dead_code, clippy::unwrap_used)]

use pagekit::{
    BrowserDriver, BrowserFixture, FixtureScope, MockDriver, MockNode, Reaction,
    RecordingSink, Session, Settings,
};
use pagekit_sites::pages::{hh, leti, moodle};
use std::sync::Arc;

pub const SETTINGS_YAML: &str = "
browser:
  kind: chrome
  size: 1280x800
  timeout_ms: 200
credentials:
  email: student@stud.etu.ru
  password: correct-horse
";

pub fn settings() -> Settings {
    Settings::from_yaml_str(SETTINGS_YAML).unwrap()
}

/// Fresh browser session over `driver`, closed when the scope drops
pub fn open_session(
    driver: &Arc<MockDriver>,
) -> (FixtureScope<BrowserFixture>, Session, RecordingSink) {
    let handle = Arc::clone(driver);
    let sink = RecordingSink::new();
    let fixture = BrowserFixture::new(settings(), move |_: &Settings| {
        let driver: Arc<dyn BrowserDriver> = handle.clone();
        Ok(driver)
    })
    .with_sink(sink.clone());
    let scope = FixtureScope::enter(fixture).unwrap();
    let session = scope.get().session().unwrap().clone();
    (scope, session, sink)
}

pub mod leti_site {
    use super::*;

    pub const EMAIL: &str = "//input[@name='email']";
    pub const PASSWORD: &str = "//input[@name='password']";
    pub const SUBMIT: &str = "//button[contains(@class,'btn-primary')]";
    pub const REMEMBER: &str = "//input[@type='checkbox'][@id='remember']";
    pub const ERROR: &str = "//span[contains(@class,'text-error')]";
    pub const PERSONAL: &str = "//a[@href='/personal']";
    pub const DROPDOWN: &str = "//div[contains(@class,'dropdown-bottom')]";
    pub const LOGOUT: &str = "//button[text()=' Выйти']";
    pub const CABINET: &str = "//a[contains(@href,'https://lk.etu.ru/?')]";
    pub const CABINET_URL: &str = "https://lk.etu.ru/?auth=id";

    /// Identity portal accepting exactly one account
    pub fn build(email: &str, password: &str) -> Arc<MockDriver> {
        let driver = MockDriver::new();
        driver.add_node(leti::LOGIN_URL, EMAIL, MockNode::input().with_attribute("name", "email"));
        driver.add_node(
            leti::LOGIN_URL,
            PASSWORD,
            MockNode::input().with_attribute("type", "password"),
        );
        driver.add_node(leti::LOGIN_URL, SUBMIT, MockNode::button().with_text("Войти"));
        driver.add_node(leti::LOGIN_URL, REMEMBER, MockNode::checkbox());
        driver.add_node(
            leti::LOGIN_URL,
            ERROR,
            MockNode::new("span")
                .hidden()
                .with_text(" Неверный email или пароль "),
        );

        let (email, password) = (email.to_string(), password.to_string());
        driver.on_click_with(leti::LOGIN_URL, SUBMIT, move |state| {
            let accepted = state.value_of(EMAIL).as_deref() == Some(email.as_str())
                && state.value_of(PASSWORD).as_deref() == Some(password.as_str());
            if accepted {
                state.load(leti::HOME_URL);
            } else if let Some(error) = state.node_mut(ERROR) {
                error.visible = true;
            }
        });

        driver.add_node(leti::HOME_URL, PERSONAL, MockNode::link("/personal"));
        driver.add_node(leti::HOME_URL, DROPDOWN, MockNode::new("div"));
        driver.add_node(leti::HOME_URL, LOGOUT, MockNode::button().hidden());
        driver.on_click(leti::HOME_URL, DROPDOWN, Reaction::Show(LOGOUT.to_string()));
        driver.on_click(
            leti::HOME_URL,
            LOGOUT,
            Reaction::Navigate(leti::LOGIN_URL.to_string()),
        );
        driver.add_node(leti::HOME_URL, CABINET, MockNode::link(CABINET_URL));
        driver.on_click(leti::HOME_URL, CABINET, Reaction::Navigate(CABINET_URL.to_string()));
        Arc::new(driver)
    }
}

pub mod moodle_site {
    use super::*;

    pub const MAIN_BUTTON: &str = "//button[@id='loginbtn']";
    pub const USERNAME: &str = "//input[@autocomplete='username']";
    pub const PASSWORD: &str = "//input[@autocomplete='current-password']";
    pub const SUBMIT: &str = "//button[text()='Вход']";
    pub const REMEMBER: &str = "//input[@type='checkbox'][contains(@name,'remember')]";
    pub const ERROR: &str = "//div[contains(text(),'Неверный')]";
    pub const HEADER: &str = r#"//h5[@id="instance-15219-header"]"#;
    pub const ACTION_MENU: &str = "//a[@id='action-menu-toggle-1']";
    pub const ADMIN: &str = "//a[contains(@data-title,'admin')]";
    pub const ADMIN_URL: &str = "https://vec.etu.ru/moodle/admin/search.php";

    /// Moodle login accepting exactly one account
    pub fn build(username: &str, password: &str) -> Arc<MockDriver> {
        let driver = MockDriver::new();
        driver.add_node(moodle::LOGIN_URL, MAIN_BUTTON, MockNode::button());
        driver.add_node(moodle::LOGIN_URL, USERNAME, MockNode::input());
        driver.add_node(moodle::LOGIN_URL, PASSWORD, MockNode::input());
        driver.add_node(moodle::LOGIN_URL, SUBMIT, MockNode::button().with_text("Вход"));
        driver.add_node(
            moodle::LOGIN_URL,
            REMEMBER,
            MockNode::checkbox().with_attribute("name", "rememberusername"),
        );
        driver.add_node(
            moodle::LOGIN_URL,
            ERROR,
            MockNode::new("div")
                .hidden()
                .with_text("Неверный логин или пароль, попробуйте заново."),
        );

        let (username, password) = (username.to_string(), password.to_string());
        driver.on_click_with(moodle::LOGIN_URL, SUBMIT, move |state| {
            let accepted = state.value_of(USERNAME).as_deref() == Some(username.as_str())
                && state.value_of(PASSWORD).as_deref() == Some(password.as_str());
            if accepted {
                state.load(moodle::MAIN_URL);
            } else if let Some(error) = state.node_mut(ERROR) {
                error.visible = true;
            }
        });

        driver.add_node(moodle::MAIN_URL, HEADER, MockNode::new("h5").with_text("Курсы"));
        driver.add_node(moodle::MAIN_URL, ACTION_MENU, MockNode::link("#"));
        driver.add_node(
            moodle::MAIN_URL,
            ADMIN,
            MockNode::link(ADMIN_URL)
                .with_attribute("data-title", "admin,moodle")
                .hidden(),
        );
        driver.on_click(moodle::MAIN_URL, ACTION_MENU, Reaction::Show(ADMIN.to_string()));
        driver.on_click(moodle::MAIN_URL, ADMIN, Reaction::Navigate(ADMIN_URL.to_string()));
        Arc::new(driver)
    }
}

pub mod hh_site {
    use super::*;

    pub const MAIN_BUTTON: &str = "//button[@data-qa='search-button']";
    pub const SEARCH_INPUT: &str = "//input[@data-qa='search-input']";
    pub const SUBMIT: &str = "//button[@type='submit']";
    pub const CLEAR: &str = "//button[@data-qa='input-clearable-button']";
    pub const REGION: &str = "//button[@data-qa='region-clarification-submit-button']";
    pub const MODAL: &str = "//div[@data-qa='bloko-modal-close']";
    pub const SAVED: &str = "//button[contains(@data-qa,'saved')]";
    pub const SALARY_65: &str = "//input[@type='radio'][@value='65000']";
    pub const SALARY_ANY: &str = "//input[@type='radio'][@value='']";
    pub const EMPLOYERS: &str = "//a[text()='Работодателям']";
    pub const CV: &str = "//a[contains(text(),'базе резюме')]";
    pub const EMPLOYERS_URL: &str = "https://spb.hh.ru/employer";

    /// Job board; `with_modal` shows the advertising modal on every page
    pub fn build(with_modal: bool) -> Arc<MockDriver> {
        let driver = MockDriver::new();
        driver.add_node(hh::MAIN_URL, MAIN_BUTTON, MockNode::button());
        driver.add_node(hh::MAIN_URL, SEARCH_INPUT, MockNode::input());
        driver.add_node(hh::MAIN_URL, SUBMIT, MockNode::button());
        driver.add_node(hh::MAIN_URL, CLEAR, MockNode::button().hidden());
        driver.add_node(hh::MAIN_URL, REGION, MockNode::button());
        for url in [hh::MAIN_URL, hh::SEARCH_URL] {
            let modal = MockNode::new("div");
            driver.add_node(url, MODAL, if with_modal { modal } else { modal.hidden() });
            driver.on_click(url, MODAL, Reaction::Hide(MODAL.to_string()));
        }

        driver.on_input_with(hh::MAIN_URL, SEARCH_INPUT, |state| {
            let typed = state.value_of(SEARCH_INPUT).is_some_and(|v| !v.is_empty());
            if let Some(clear) = state.node_mut(CLEAR) {
                clear.visible = typed;
            }
        });
        driver.on_click(hh::MAIN_URL, CLEAR, Reaction::ClearValue(SEARCH_INPUT.to_string()));
        driver.on_click(hh::MAIN_URL, CLEAR, Reaction::Hide(CLEAR.to_string()));
        driver.on_click(hh::MAIN_URL, REGION, Reaction::Hide(REGION.to_string()));
        driver.on_click(hh::MAIN_URL, SUBMIT, Reaction::Navigate(hh::SEARCH_URL.to_string()));

        driver.add_node(hh::SEARCH_URL, SAVED, MockNode::button().visible_after(2));
        driver.add_node(
            hh::SEARCH_URL,
            SALARY_ANY,
            MockNode::radio("salary").selected(true),
        );
        driver.add_node(
            hh::SEARCH_URL,
            SALARY_65,
            MockNode::radio("salary").with_value("65000"),
        );
        driver.add_node(hh::SEARCH_URL, EMPLOYERS, MockNode::link("/employer"));
        driver.add_node(EMPLOYERS_URL, CV, MockNode::link("/search/resume"));
        driver.on_click(
            hh::SEARCH_URL,
            EMPLOYERS,
            Reaction::Navigate(EMPLOYERS_URL.to_string()),
        );
        Arc::new(driver)
    }
}
