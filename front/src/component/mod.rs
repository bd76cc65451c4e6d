mod dropzone;
mod notification;

pub use dropzone::{DropZone, Props as DropZoneProps};
pub use notification::NotificationManager;
