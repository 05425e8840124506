//! hh.ru job board, Saint Petersburg region.

use crate::DataQa;
use pagekit::{
    Button, Condition, Element, Link, Page, PageObject, RadioButton, Session, TextInput,
    UiResult, VisibilityCheckable, XPathBuilder,
};

/// Job board home
pub const MAIN_URL: &str = "https://spb.hh.ru/?hhtmFrom=vacancy_search_list";
/// Vacancy search results
pub const SEARCH_URL: &str =
    "https://spb.hh.ru/search/vacancy?text=&area=2&hhtmFrom=main&hhtmFromLabel=vacancy_search_line";

/// Home page with the vacancy search bar
#[derive(Debug, Clone)]
pub struct MainPageHh {
    page: Page,
    search_input: TextInput,
    search_button: Button,
    clear_text_button: Button,
    region_button: Button,
    modal_close: Element,
}

impl MainPageHh {
    /// Declare the page; nothing is resolved yet
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            page: Page::with_main_element(
                session,
                MAIN_URL,
                &Button::by_data_qa(session, "search-button"),
            ),
            search_input: TextInput::by_data_qa(session, "search-input"),
            search_button: Button::by_type(session, "submit"),
            clear_text_button: Button::by_data_qa(session, "input-clearable-button"),
            region_button: Button::by_data_qa(session, "region-clarification-submit-button"),
            modal_close: Element::new(
                session,
                XPathBuilder::create("div")
                    .with_attribute("data-qa", "bloko-modal-close")
                    .build(),
            ),
        }
    }

    /// Type a query into the search bar
    pub fn enter_search_request(&self, query: &str) -> UiResult<()> {
        tracing::debug!(query, "search request");
        self.search_input.set_value(query)
    }

    /// Run the search
    pub fn click_search_button(&self) -> UiResult<()> {
        self.search_button.click()
    }

    /// Confirm the suggested region
    pub fn click_region_button(&self) -> UiResult<()> {
        self.region_button.click()
    }

    /// Wait for the region confirmation prompt
    pub fn region_button_is_displayed(&self) -> UiResult<()> {
        self.region_button.is_displayed()
    }

    /// Wait for the "clear" cross in the search bar
    pub fn clear_text_button_is_displayed(&self) -> UiResult<()> {
        self.clear_text_button.is_displayed()
    }

    /// Wait for the "clear" cross to go away
    pub fn clear_text_button_is_not_displayed(&self) -> UiResult<()> {
        self.clear_text_button.is_not_displayed()
    }

    /// Empty the search bar with its "clear" cross
    pub fn click_clear_text_button(&self) -> UiResult<()> {
        self.clear_text_button.click()
    }

    /// Whether the search bar is empty now
    pub fn search_input_is_empty(&self) -> UiResult<bool> {
        self.search_input.is_empty()
    }

    /// Wait until the search bar is empty
    pub fn search_input_should_be_empty(&self) -> UiResult<()> {
        self.search_input.should_be_empty()
    }

    /// Whether the advertising modal is showing now; never waits
    pub fn modal_is_displayed(&self) -> UiResult<bool> {
        self.modal_close.is_visible_now()
    }

    /// Close the advertising modal
    pub fn close_modal(&self) -> UiResult<()> {
        self.modal_close.click_when(&Condition::Visible)
    }
}

impl PageObject for MainPageHh {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

/// Vacancy search results with the salary filter
#[derive(Debug, Clone)]
pub struct SearchPageHh {
    page: Page,
    salary_65000: RadioButton,
    employer_link: Link,
    cv_link: Link,
}

impl SearchPageHh {
    /// Declare the page; nothing is resolved yet
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            page: Page::with_main_element(
                session,
                SEARCH_URL,
                &Button::by_contains_data_qa(session, "saved"),
            ),
            salary_65000: RadioButton::by_value(session, "65000"),
            employer_link: Link::by_text(session, "Работодателям"),
            cv_link: Link::by_contains_text(session, "базе резюме"),
        }
    }

    /// Pick the "from 65 000" salary filter
    pub fn select_radio_button_65(&self) -> UiResult<()> {
        self.salary_65000.select()
    }

    /// Wait until the 65 000 filter is selected
    pub fn radio_button_65_should_be_selected(&self) -> UiResult<()> {
        self.salary_65000.should_be_selected()
    }

    /// Wait until the 65 000 filter is not selected
    pub fn radio_button_65_should_not_be_selected(&self) -> UiResult<()> {
        self.salary_65000.should_not_be_selected()
    }

    /// Go to the employers section
    pub fn click_employer_link(&self) -> UiResult<()> {
        self.employer_link.click()
    }

    /// Wait for the CV database link
    pub fn cv_is_displayed(&self) -> UiResult<()> {
        self.cv_link.is_displayed()
    }
}

impl PageObject for SearchPageHh {
    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}
