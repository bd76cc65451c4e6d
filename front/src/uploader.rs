use {
    crate::{
        browser::Browser,
        drop::{CardinalityError, DroppedFileSet},
        state::ZoneState,
        upload::{upload, Transport, UploadError, UploadResult},
    },
    std::future::Future,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSignal {
    Enter,
    Over,
    Leave,
    End,
}

/// What became of a drop.
#[derive(Debug, PartialEq, Eq)]
pub enum DropOutcome<F> {
    /// The single file to send.
    Upload(F),
    /// Wrong file count, to be reported with [`DropZoneUploader::refuse`] once the loader shows.
    Refused(CardinalityError),
    /// An upload is already running.
    Ignored,
}

impl<F> DropOutcome<F> {
    pub fn into_upload(self) -> Option<F> {
        match self {
            DropOutcome::Upload(file) => Some(file),
            _ => None,
        }
    }
}

/// Event driven core of the drop zone, free of any DOM access.
pub struct DropZoneUploader<B, T> {
    state: ZoneState,
    browser: B,
    transport: T,
    endpoint: String,
}

impl<B, T> DropZoneUploader<B, T>
where
    B: Browser,
    T: Transport + Clone + 'static,
    T::File: 'static,
{
    pub fn new(browser: B, transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            state: ZoneState::default(),
            browser,
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn state(&self) -> &ZoneState {
        &self.state
    }

    /// Returns true if the zone needs to be re-rendered.
    pub fn drag(&mut self, signal: DragSignal) -> bool {
        let next = match (&self.state, signal) {
            (ZoneState::Uploading, _) => return false,
            (ZoneState::Hovered, DragSignal::Enter) => return false,
            (_, DragSignal::Enter) => ZoneState::Hovered,
            (ZoneState::Hovered, DragSignal::Leave | DragSignal::End) => ZoneState::Idle,
            _ => return false,
        };

        self.state = next;
        true
    }

    /// Takes the zone to its uploading state, whatever the drop carries.
    pub fn drop_files(&mut self, files: DroppedFileSet<T::File>) -> DropOutcome<T::File> {
        if !self.state.accepts_drop() {
            warn!(
                "Ignoring a drop of {} file(s), an upload is already running",
                files.len()
            );
            return DropOutcome::Ignored;
        }

        self.state = ZoneState::Uploading;

        match files.single() {
            Ok(file) => DropOutcome::Upload(file),
            Err(e) => {
                warn!("Refused a drop of {} file(s)", e.count);
                DropOutcome::Refused(e)
            }
        }
    }

    /// Alerts the user then reloads the page, dropping every bit of state.
    pub fn refuse(&self, error: &CardinalityError) {
        self.browser.alert(&error.to_string());
        self.browser.reload();
    }

    pub fn upload_task(
        &self,
        file: T::File,
    ) -> impl Future<Output = Result<UploadResult, UploadError>> + 'static {
        let transport = self.transport.clone();
        let endpoint = self.endpoint.clone();

        async move { upload(&transport, &endpoint, file).await }
    }

    /// Returns true if the zone needs to be re-rendered.
    pub fn finish(&mut self, result: Result<UploadResult, UploadError>) -> bool {
        match result {
            Ok(result) => {
                let path = result.redirect_path();
                info!("Upload done, redirecting to {path}");
                self.browser.navigate(&path);
                false
            }
            Err(e) => {
                error!("Upload failed: {e}");
                self.state = ZoneState::Failed(e.to_string());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{DragSignal, DropOutcome, DropZoneUploader},
        crate::{
            browser::Browser,
            drop::{CardinalityError, DropItem, DropSource, DroppedFileSet, ItemKind},
            state::{render, Content, ZoneState},
            upload::{RawResponse, Transport, UploadError},
        },
        futures::{executor::block_on, future::LocalBoxFuture, FutureExt as _},
        std::{cell::RefCell, rc::Rc},
    };

    #[derive(Debug, PartialEq)]
    enum Effect {
        Alert(String),
        Reload,
        Navigate(String),
    }

    #[derive(Default, Clone)]
    struct RecordingBrowser {
        effects: Rc<RefCell<Vec<Effect>>>,
    }

    impl Browser for RecordingBrowser {
        fn alert(&self, message: &str) {
            self.effects
                .borrow_mut()
                .push(Effect::Alert(message.to_string()));
        }

        fn reload(&self) {
            self.effects.borrow_mut().push(Effect::Reload);
        }

        fn navigate(&self, path: &str) {
            self.effects
                .borrow_mut()
                .push(Effect::Navigate(path.to_string()));
        }
    }

    #[derive(Clone)]
    struct RecordingTransport {
        body: String,
        posts: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
    }

    impl Transport for RecordingTransport {
        type File = Vec<u8>;

        fn post(
            &self,
            endpoint: &str,
            file: Vec<u8>,
        ) -> LocalBoxFuture<'static, Result<RawResponse, UploadError>> {
            self.posts.borrow_mut().push((endpoint.to_string(), file));
            let response = RawResponse {
                status: 201,
                body: self.body.clone(),
            };
            async move { Ok(response) }.boxed_local()
        }
    }

    fn uploader(
        body: &str,
    ) -> (
        DropZoneUploader<RecordingBrowser, RecordingTransport>,
        RecordingBrowser,
        RecordingTransport,
    ) {
        let browser = RecordingBrowser::default();
        let transport = RecordingTransport {
            body: body.to_string(),
            posts: Rc::default(),
        };
        let uploader = DropZoneUploader::new(browser.clone(), transport.clone(), "/upload");
        (uploader, browser, transport)
    }

    fn files(contents: &[&str]) -> DroppedFileSet<Vec<u8>> {
        DroppedFileSet::from_source(DropSource::Items(
            contents
                .iter()
                .map(|content| DropItem::new(ItemKind::File, Some(content.as_bytes().to_vec())))
                .collect(),
        ))
    }

    #[test]
    fn single_file_is_posted_then_redirected() {
        let (mut uploader, browser, transport) = uploader(r#"{"id":"abc123"}"#);

        let file = uploader.drop_files(files(&["content"])).into_upload().unwrap();
        assert_eq!(*uploader.state(), ZoneState::Uploading);

        let result = block_on(uploader.upload_task(file));
        assert!(!uploader.finish(result));

        assert_eq!(
            *transport.posts.borrow(),
            vec![("/upload".to_string(), b"content".to_vec())]
        );
        assert_eq!(
            *browser.effects.borrow(),
            vec![Effect::Navigate("/abc123".to_string())]
        );
    }

    #[test]
    fn several_files_alert_and_reload() {
        let (mut uploader, browser, transport) = uploader(r#"{"id":"abc123"}"#);

        let outcome = uploader.drop_files(files(&["a", "b"]));
        assert_eq!(outcome, DropOutcome::Refused(CardinalityError { count: 2 }));

        // The loader is up before the user gets alerted
        assert!(browser.effects.borrow().is_empty());
        assert_eq!(render(uploader.state()).content, Content::Loader);

        if let DropOutcome::Refused(e) = outcome {
            uploader.refuse(&e);
        }

        assert!(transport.posts.borrow().is_empty());
        assert_eq!(
            *browser.effects.borrow(),
            vec![
                Effect::Alert("You may only upload one file at a time".to_string()),
                Effect::Reload
            ]
        );
    }

    #[test]
    fn empty_drop_alerts_and_reloads() {
        let (mut uploader, browser, transport) = uploader("{}");

        let outcome = uploader.drop_files(files(&[]));
        assert_eq!(outcome, DropOutcome::Refused(CardinalityError { count: 0 }));
        uploader.refuse(&CardinalityError { count: 0 });

        assert!(transport.posts.borrow().is_empty());
        assert_eq!(browser.effects.borrow().len(), 2);
        assert_eq!(browser.effects.borrow()[1], Effect::Reload);
    }

    #[test]
    fn folder_drop_is_treated_as_empty() {
        let (mut uploader, _browser, _transport) = uploader("{}");

        let folder = DroppedFileSet::from_source(DropSource::Items(vec![DropItem::new(
            ItemKind::Other,
            None,
        )]));

        assert_eq!(
            uploader.drop_files(folder),
            DropOutcome::Refused(CardinalityError { count: 0 })
        );
    }

    #[test]
    fn second_drop_during_upload_is_ignored() {
        let (mut uploader, browser, _transport) = uploader("{}");

        assert_eq!(
            uploader.drop_files(files(&["first"])),
            DropOutcome::Upload(b"first".to_vec())
        );
        assert_eq!(
            uploader.drop_files(files(&["second"])),
            DropOutcome::Ignored
        );

        assert!(browser.effects.borrow().is_empty());
        assert_eq!(*uploader.state(), ZoneState::Uploading);
    }

    #[test]
    fn missing_id_redirects_to_undefined() {
        let (mut uploader, browser, _transport) = uploader(r#"{"other":1}"#);

        let file = uploader.drop_files(files(&["x"])).into_upload().unwrap();
        let result = block_on(uploader.upload_task(file));
        uploader.finish(result);

        assert_eq!(
            *browser.effects.borrow(),
            vec![Effect::Navigate("/undefined".to_string())]
        );
    }

    #[test]
    fn failure_is_shown_and_zone_recovers() {
        let (mut uploader, browser, _transport) = uploader("not json");

        let file = uploader.drop_files(files(&["x"])).into_upload().unwrap();
        let result = block_on(uploader.upload_task(file));

        assert!(uploader.finish(result));
        assert!(matches!(uploader.state(), ZoneState::Failed(_)));
        assert!(browser.effects.borrow().is_empty());

        // The zone takes drops again
        assert!(uploader.drag(DragSignal::Enter));
        assert_eq!(*uploader.state(), ZoneState::Hovered);
        assert!(uploader.drop_files(files(&["retry"])).into_upload().is_some());
    }

    #[test]
    fn hover_follows_enter_and_leave() {
        let (mut uploader, _browser, _transport) = uploader("{}");

        assert!(uploader.drag(DragSignal::Enter));
        assert_eq!(*uploader.state(), ZoneState::Hovered);

        assert!(!uploader.drag(DragSignal::Over));
        assert!(!uploader.drag(DragSignal::Enter));
        assert_eq!(*uploader.state(), ZoneState::Hovered);

        assert!(uploader.drag(DragSignal::Leave));
        assert_eq!(*uploader.state(), ZoneState::Idle);

        assert!(uploader.drag(DragSignal::Enter));
        assert!(uploader.drag(DragSignal::End));
        assert_eq!(*uploader.state(), ZoneState::Idle);

        assert!(!uploader.drag(DragSignal::Leave));
    }

    #[test]
    fn drag_is_ignored_while_uploading() {
        let (mut uploader, _browser, _transport) = uploader("{}");

        uploader.drop_files(files(&["x"]));

        assert!(!uploader.drag(DragSignal::Enter));
        assert!(!uploader.drag(DragSignal::Leave));
        assert_eq!(*uploader.state(), ZoneState::Uploading);
    }
}
