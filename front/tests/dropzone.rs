//! In browser checks of the drop zone's DOM wiring.
//!
//! Run with `wasm-pack test --headless --firefox front` (or chrome).
#![cfg(target_arch = "wasm32")]

use {
    front::{DropZone, DropZoneProps, DroppedFileSet},
    std::time::Duration,
    wasm_bindgen::JsValue,
    wasm_bindgen_test::wasm_bindgen_test,
    web_sys::{DataTransfer, DragEvent, DragEventInit, Element},
};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

/// Lets the yew scheduler flush pending messages and renders.
async fn settle() {
    gloo_timers::future::sleep(Duration::from_millis(20)).await;
}

async fn mount() -> Element {
    let document = gloo::utils::document();
    let root = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&root).unwrap();

    yew::Renderer::<DropZone>::with_root_and_props(
        root.clone(),
        DropZoneProps {
            endpoint: "/upload".into(),
        },
    )
    .render();
    settle().await;

    root.query_selector("#drop-area")
        .unwrap()
        .expect("the drop zone to be rendered")
}

fn file(name: &str) -> web_sys::File {
    let parts = js_sys::Array::of1(&JsValue::from_str("file content"));
    web_sys::File::new_with_str_sequence(&parts, name).unwrap()
}

/// Dispatches a bubbling, cancelable drag event and returns whether its default got prevented.
fn dispatch(target: &Element, kind: &str, data_transfer: Option<&DataTransfer>) -> bool {
    let init = DragEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_data_transfer(data_transfer);

    let event = DragEvent::new_with_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
    event.default_prevented()
}

fn is_hovered(zone: &Element) -> bool {
    zone.class_list().contains("file-hovered")
}

#[wasm_bindgen_test]
async fn drag_defaults_are_always_prevented() {
    let zone = mount().await;

    assert!(dispatch(&zone, "dragenter", None));
    assert!(dispatch(&zone, "dragover", None));
    assert!(dispatch(&zone, "dragleave", None));
}

#[wasm_bindgen_test]
async fn hover_is_cleared_by_leave_not_by_enter() {
    let zone = mount().await;
    assert!(!is_hovered(&zone));

    dispatch(&zone, "dragenter", None);
    settle().await;
    assert!(is_hovered(&zone));

    // Entering again, over a child for instance, keeps the hover
    dispatch(&zone, "dragenter", None);
    settle().await;
    assert!(is_hovered(&zone));

    dispatch(&zone, "dragleave", None);
    settle().await;
    assert!(!is_hovered(&zone));

    dispatch(&zone, "dragenter", None);
    dispatch(&zone, "dragend", None);
    settle().await;
    assert!(!is_hovered(&zone));
}

#[wasm_bindgen_test]
async fn drop_is_prevented_and_shows_the_loader() {
    let zone = mount().await;

    let data_transfer = DataTransfer::new().unwrap();
    data_transfer.items().add_with_file(&file("photo.png")).unwrap();

    dispatch(&zone, "dragenter", None);
    assert!(dispatch(&zone, "drop", Some(&data_transfer)));
    settle().await;

    assert!(!is_hovered(&zone));
    // The test server has no upload endpoint, the zone may already report the failure
    let classes = zone.class_list();
    assert!(classes.contains("uploading") || classes.contains("upload-failed"));
}

#[wasm_bindgen_test]
fn items_are_preferred_and_filtered_to_files() {
    let data_transfer = DataTransfer::new().unwrap();
    let items = data_transfer.items();
    items
        .add_with_str_and_type("https://example.com", "text/uri-list")
        .unwrap();
    items.add_with_file(&file("notes.txt")).unwrap();

    let set = DroppedFileSet::from_data_transfer(Some(&data_transfer));

    assert_eq!(set.len(), 1);
    assert_eq!(set.single().unwrap().name(), "notes.txt");
}

#[wasm_bindgen_test]
fn text_only_drop_has_no_files() {
    let data_transfer = DataTransfer::new().unwrap();
    data_transfer
        .items()
        .add_with_str_and_type("just some text", "text/plain")
        .unwrap();

    assert!(DroppedFileSet::from_data_transfer(Some(&data_transfer)).is_empty());
    assert!(DroppedFileSet::from_data_transfer(None).is_empty());
}
