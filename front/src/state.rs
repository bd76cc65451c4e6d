//! Visual state of the drop zone and how it maps to the DOM.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ZoneState {
    #[default]
    Idle,
    Hovered,
    Uploading,
    Failed(String),
}

impl ZoneState {
    pub fn accepts_drop(&self) -> bool {
        !matches!(self, ZoneState::Uploading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Prompt,
    Loader,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub classes: Vec<&'static str>,
    pub content: Content,
}

impl Rendering {
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

pub const BASE_CLASS: &str = "drop-area";
pub const HOVERED_CLASS: &str = "file-hovered";
pub const UPLOADING_CLASS: &str = "uploading";
pub const FAILED_CLASS: &str = "upload-failed";

pub fn render(state: &ZoneState) -> Rendering {
    match state {
        ZoneState::Idle => Rendering {
            classes: vec![BASE_CLASS],
            content: Content::Prompt,
        },
        ZoneState::Hovered => Rendering {
            classes: vec![BASE_CLASS, HOVERED_CLASS],
            content: Content::Prompt,
        },
        ZoneState::Uploading => Rendering {
            classes: vec![BASE_CLASS, UPLOADING_CLASS],
            content: Content::Loader,
        },
        ZoneState::Failed(message) => Rendering {
            classes: vec![BASE_CLASS, FAILED_CLASS],
            content: Content::Error(message.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{render, Content, ZoneState};

    #[test]
    fn hovered_class_only_while_hovered() {
        assert_eq!(render(&ZoneState::Idle).class_name(), "drop-area");
        assert_eq!(
            render(&ZoneState::Hovered).class_name(),
            "drop-area file-hovered"
        );
        assert!(!render(&ZoneState::Uploading)
            .classes
            .contains(&"file-hovered"));
    }

    #[test]
    fn uploading_shows_the_loader() {
        assert_eq!(render(&ZoneState::Uploading).content, Content::Loader);
        assert!(!ZoneState::Uploading.accepts_drop());
    }

    #[test]
    fn failure_is_visible_and_recoverable() {
        let state = ZoneState::Failed(String::from("nope"));

        assert_eq!(render(&state).content, Content::Error(String::from("nope")));
        assert_eq!(render(&state).class_name(), "drop-area upload-failed");
        assert!(state.accepts_drop());
    }
}
