//! Example: Page Object Model
//!
//! Demonstrates: a login page composed from typed elements, driven against the
//! in-memory mock browser
//!
//! Run with: `cargo run --example page_object`

use pagekit::prelude::*;
use pagekit::{init_logging, LogFormat, MockDriver, MockNode, Reaction};

const LOGIN_URL: &str = "https://demo.test/login";
const HOME_URL: &str = "https://demo.test/";

struct LoginPage {
    page: Page,
    username: TextInput,
    password: TextInput,
    remember: Checkbox,
    submit: Button,
}

impl LoginPage {
    fn new(session: &Session) -> Self {
        let submit = Button::by_id(session, "loginbtn");
        Self {
            page: Page::with_main_element(session, LOGIN_URL, &submit),
            username: TextInput::by_name(session, "username"),
            password: TextInput::by_name(session, "password"),
            remember: Checkbox::by_contains_name(session, "remember"),
            submit,
        }
    }

    fn login(&self, username: &str, password: &str) -> UiResult<()> {
        self.username.set_value(username)?;
        self.password.set_secret_value(password)?;
        self.submit.click()
    }
}

impl PageObject for LoginPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

fn demo_site() -> MockDriver {
    let driver = MockDriver::new();
    driver.add_node(LOGIN_URL, "//button[@id='loginbtn']", MockNode::button());
    driver.add_node(LOGIN_URL, "//input[@name='username']", MockNode::input());
    driver.add_node(LOGIN_URL, "//input[@name='password']", MockNode::input());
    driver.add_node(
        LOGIN_URL,
        "//input[@type='checkbox'][contains(@name,'remember')]",
        MockNode::checkbox(),
    );
    driver.on_click(
        LOGIN_URL,
        "//button[@id='loginbtn']",
        Reaction::Navigate(HOME_URL.to_string()),
    );
    driver.add_node(HOME_URL, "//h1[text()='Dashboard']", MockNode::new("h1"));
    driver
}

fn main() -> UiResult<()> {
    init_logging(LogFormat::from_env())?;
    println!("=== Page Object Model Example ===\n");

    let session = Session::new(demo_site());

    println!("1. Opening the login page...");
    let mut login = LoginPage::new(&session);
    login.open_page()?;
    println!("   {} is {:?}", login.page_name(), login.state());

    println!("\n2. Ticking \"remember me\" twice...");
    login.remember.check()?;
    login.remember.check()?;
    println!("   checked: {}", login.remember.is_checked()?);

    println!("\n3. Logging in...");
    login.login("student", "hunter2")?;

    let mut home = Page::new(&session, HOME_URL, "//h1[text()='Dashboard']");
    home.wait_for_page_to_load()?;
    println!("   {} is {:?}", home.url(), home.state());

    session.close()?;
    println!("\n=== Done ===");
    Ok(())
}
