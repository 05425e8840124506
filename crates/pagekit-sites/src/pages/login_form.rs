use pagekit::{Button, Checkbox, Element, TextInput, UiResult, VisibilityCheckable};

/// Credentials form shared by the ETU login pages
#[derive(Debug, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: TextInput,
    pub(crate) password: TextInput,
    pub(crate) submit: Button,
    pub(crate) remember: Checkbox,
    pub(crate) error: Element,
}

impl LoginForm {
    pub(crate) fn enter_username(&self, username: &str) -> UiResult<()> {
        self.username.set_value(username)
    }

    pub(crate) fn enter_password(&self, password: &str) -> UiResult<()> {
        self.password.set_secret_value(password)
    }

    pub(crate) fn submit(&self) -> UiResult<()> {
        self.submit.click()
    }

    pub(crate) fn login(&self, username: &str, password: &str) -> UiResult<()> {
        tracing::info!(username, "logging in");
        self.enter_username(username)?;
        self.enter_password(password)?;
        self.submit()
    }

    pub(crate) fn error_is_displayed(&self) -> UiResult<()> {
        self.error.is_displayed()
    }

    pub(crate) fn error_message(&self) -> UiResult<String> {
        self.error.is_displayed()?;
        Ok(self.error.text()?.trim().to_string())
    }

    pub(crate) fn check_remember(&self) -> UiResult<()> {
        self.remember.check()
    }
}
