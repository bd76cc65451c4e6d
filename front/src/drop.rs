//! Extraction of the files carried by a single drop event.

/// What the platform says a dragged entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    String,
    Other,
}

impl ItemKind {
    pub fn from_platform(kind: &str) -> Self {
        match kind {
            "file" => ItemKind::File,
            "string" => ItemKind::String,
            _ => ItemKind::Other,
        }
    }
}

#[derive(Debug)]
pub struct DropItem<F> {
    kind: ItemKind,
    file: Option<F>,
}

impl<F> DropItem<F> {
    pub fn new(kind: ItemKind, file: Option<F>) -> Self {
        Self { kind, file }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

/// The raw listing a drop event exposes, structured items when the platform has them.
#[derive(Debug)]
pub enum DropSource<F> {
    Items(Vec<DropItem<F>>),
    Files(Vec<F>),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("You may only upload one file at a time")]
pub struct CardinalityError {
    pub count: usize,
}

/// Files of one drop, only meaningful while that drop is being handled.
#[derive(Debug)]
pub struct DroppedFileSet<F> {
    files: Vec<F>,
}

impl<F> DroppedFileSet<F> {
    pub fn empty() -> Self {
        Self { files: Vec::new() }
    }

    pub fn from_source(source: DropSource<F>) -> Self {
        let files = match source {
            DropSource::Items(items) => items
                .into_iter()
                .filter(|item| item.kind == ItemKind::File)
                .filter_map(|item| item.file)
                .collect(),
            DropSource::Files(files) => files,
        };

        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Hands back the only file of the drop, anything else is refused.
    pub fn single(self) -> Result<F, CardinalityError> {
        let count = self.files.len();
        let mut files = self.files.into_iter();

        match (files.next(), files.next()) {
            (Some(file), None) => Ok(file),
            _ => Err(CardinalityError { count }),
        }
    }
}

impl DroppedFileSet<web_sys::File> {
    pub fn from_data_transfer(data_transfer: Option<&web_sys::DataTransfer>) -> Self {
        let Some(data_transfer) = data_transfer else {
            warn!("Drop event without any data transfer");
            return Self::empty();
        };

        Self::from_source(web_drop_source(data_transfer))
    }
}

fn web_drop_source(data_transfer: &web_sys::DataTransfer) -> DropSource<web_sys::File> {
    use wasm_bindgen::JsValue;

    // Older engines only expose `files`
    let has_items =
        js_sys::Reflect::has(data_transfer, &JsValue::from_str("items")).unwrap_or(false);

    if has_items {
        let list = data_transfer.items();
        let items = (0..list.length())
            .filter_map(|index| list.get(index))
            .map(|item| {
                let kind = ItemKind::from_platform(&item.kind());
                let file = match kind {
                    ItemKind::File => item.get_as_file().ok().flatten(),
                    _ => None,
                };
                DropItem::new(kind, file)
            })
            .collect();

        return DropSource::Items(items);
    }

    let files = data_transfer
        .files()
        .map(|list| (0..list.length()).filter_map(|index| list.get(index)).collect())
        .unwrap_or_default();

    DropSource::Files(files)
}
