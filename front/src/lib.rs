#[macro_use(debug, info, warn, error)]
extern crate log;

mod app;
mod browser;
mod component;
mod drop;
mod state;
mod upload;
mod uploader;
mod utils;

pub use {
    app::App,
    browser::{Browser, WebBrowser},
    component::{DropZone, DropZoneProps},
    drop::{CardinalityError, DropItem, DropSource, DroppedFileSet, ItemKind},
    state::{render, Content, Rendering, ZoneState},
    upload::{
        upload, FetchTransport, RawResponse, Transport, UploadError, UploadResult,
        UPLOAD_ENDPOINT,
    },
    uploader::{DragSignal, DropOutcome, DropZoneUploader},
};

/// Id of the element the page reserves for the uploader.
pub const MOUNT_POINT_ID: &str = "drop-area-root";

/// Sets up logging and mounts the app in the page's mount point, or the body if there is none.
pub fn run() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    match gloo::utils::document().get_element_by_id(MOUNT_POINT_ID) {
        Some(root) => {
            yew::Renderer::<App>::with_root(root).render();
        }
        None => {
            warn!("No #{MOUNT_POINT_ID} element in the page, mounting on the body");
            yew::Renderer::<App>::new().render();
        }
    }
}
