use {
    super::notification::{push_notification, Notification},
    crate::{
        browser::WebBrowser,
        drop::{CardinalityError, DroppedFileSet},
        state::{render, Content},
        upload::{FetchTransport, UploadError, UploadResult, UPLOAD_ENDPOINT},
        uploader::{DragSignal, DropOutcome, DropZoneUploader},
    },
    std::time::Duration,
    yew::{html::Scope, AttrValue, Callback, DragEvent},
};

const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// An alert blocks painting, the loader gets this long to show up first.
const REFUSAL_DELAY: Duration = Duration::from_millis(50);

fn default_endpoint() -> AttrValue {
    AttrValue::from(UPLOAD_ENDPOINT)
}

#[derive(Debug, PartialEq, yew::Properties)]
pub struct Props {
    #[prop_or_else(default_endpoint)]
    pub endpoint: AttrValue,
}

pub enum Message {
    Drag(DragSignal),
    Drop(DroppedFileSet<web_sys::File>),
    Refuse(CardinalityError),
    Finished(Result<UploadResult, UploadError>),
}

pub struct DropZone {
    uploader: DropZoneUploader<WebBrowser, FetchTransport>,
}

impl yew::Component for DropZone {
    type Message = Message;
    type Properties = Props;

    fn create(ctx: &yew::Context<Self>) -> Self {
        Self {
            uploader: DropZoneUploader::new(
                WebBrowser,
                FetchTransport,
                ctx.props().endpoint.to_string(),
            ),
        }
    }

    fn update(&mut self, ctx: &yew::Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::Drag(signal) => self.uploader.drag(signal),
            Message::Drop(files) => {
                let was_uploading = !self.uploader.state().accepts_drop();

                match self.uploader.drop_files(files) {
                    DropOutcome::Upload(file) => {
                        let task = self.uploader.upload_task(file);
                        ctx.link()
                            .send_future(async move { Message::Finished(task.await) });
                    }
                    DropOutcome::Refused(e) => ctx.link().send_future(async move {
                        gloo_timers::future::sleep(REFUSAL_DELAY).await;
                        Message::Refuse(e)
                    }),
                    DropOutcome::Ignored => (),
                }

                !was_uploading
            }
            Message::Refuse(e) => {
                self.uploader.refuse(&e);
                false
            }
            Message::Finished(result) => {
                match &result {
                    Ok(result) => push_notification(Notification::info(
                        "Upload done",
                        vec![format!("Redirecting to {}", result.redirect_path())],
                        NOTIFICATION_TIMEOUT,
                    )),
                    Err(e) => push_notification(Notification::error(
                        "Upload failed",
                        vec![e.to_string()],
                        NOTIFICATION_TIMEOUT,
                    )),
                }
                self.uploader.finish(result)
            }
        }
    }

    fn view(&self, ctx: &yew::Context<Self>) -> yew::Html {
        let rendering = render(self.uploader.state());
        let link = ctx.link();

        yew::html! {<div
            id="drop-area"
            class={rendering.class_name()}
            ondragenter={drag_callback(link, DragSignal::Enter)}
            ondragover={drag_callback(link, DragSignal::Over)}
            ondragleave={drag_callback(link, DragSignal::Leave)}
            ondragend={drag_callback(link, DragSignal::End)}
            ondrop={link.callback(|event: DragEvent| {
                // Otherwise the browser navigates to the dropped file
                event.prevent_default();
                Message::Drop(DroppedFileSet::from_data_transfer(event.data_transfer().as_ref()))
            })}>
            {
                match rendering.content {
                    Content::Prompt => yew::html! {
                        <p class="drop-area-prompt">{ "Drop a file here to share it" }</p>
                    },
                    Content::Loader => yew::html! { <span class="loader"></span> },
                    Content::Error(message) => yew::html! {<>
                        <p class="drop-area-error">{ message }</p>
                        <p class="drop-area-prompt">{ "Drop a file to try again" }</p>
                    </>},
                }
            }
        </div>}
    }
}

/// Every drag callback suppresses the default action, which would open the file in the tab.
fn drag_callback(link: &Scope<DropZone>, signal: DragSignal) -> Callback<DragEvent> {
    link.callback(move |event: DragEvent| {
        event.prevent_default();
        Message::Drag(signal)
    })
}
