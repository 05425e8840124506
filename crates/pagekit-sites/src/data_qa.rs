//! Factories for the `data-qa` test hooks hh.ru puts on its controls.

use pagekit::{Button, Session, TextInput, Variant};

/// Locate a variant by its `data-qa` attribute
pub trait DataQa: Variant {
    /// Exact `data-qa`
    #[must_use]
    fn by_data_qa(session: &Session, value: &str) -> Self {
        Self::by_attribute(session, "data-qa", value)
    }

    /// `data-qa` contains
    #[must_use]
    fn by_contains_data_qa(session: &Session, value: &str) -> Self {
        Self::by_contains_attribute(session, "data-qa", value)
    }
}

impl DataQa for Button {}
impl DataQa for TextInput {}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit::{Locatable, MockDriver, NullSink};

    #[test]
    fn test_data_qa_locators_keep_the_variant_tag() {
        let session = Session::new(MockDriver::new()).with_sink(NullSink);
        assert_eq!(
            Button::by_data_qa(&session, "search-button").locator().as_str(),
            "//button[@data-qa='search-button']"
        );
        assert_eq!(
            TextInput::by_contains_data_qa(&session, "search").locator().as_str(),
            "//input[contains(@data-qa,'search')]"
        );
    }
}
