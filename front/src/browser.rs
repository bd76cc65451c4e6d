/// Page level side effects the drop zone can trigger.
pub trait Browser {
    /// Blocks until the user dismisses the message.
    fn alert(&self, message: &str);

    /// Reloads the current url, discarding every bit of page state.
    fn reload(&self);

    /// Full navigation to a root relative path.
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WebBrowser;

impl Browser for WebBrowser {
    fn alert(&self, message: &str) {
        if let Err(e) = gloo::utils::window().alert_with_message(message) {
            error!(
                "Could not alert the user due to: {}",
                crate::utils::js_error_message(&e)
            );
        }
    }

    fn reload(&self) {
        if let Err(e) = gloo::utils::window().location().reload() {
            error!(
                "Could not reload the page due to: {}",
                crate::utils::js_error_message(&e)
            );
        }
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = gloo::utils::window().location().set_pathname(path) {
            error!(
                "Could not navigate to {path} due to: {}",
                crate::utils::js_error_message(&e)
            );
        }
    }
}
