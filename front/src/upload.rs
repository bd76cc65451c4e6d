use futures::future::LocalBoxFuture;

pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Status and body text of the upload request, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Could not reach the server: {0}")]
    Transport(String),

    #[error("The server refused the upload (status {status})")]
    Status { status: u16 },

    #[error("Could not understand the server response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sends a file as the raw body of a POST request.
pub trait Transport {
    type File;

    fn post(
        &self,
        endpoint: &str,
        file: Self::File,
    ) -> LocalBoxFuture<'static, Result<RawResponse, UploadError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    id: Option<String>,
}

impl UploadResult {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        use serde_json::Value;

        let value: Value = serde_json::from_str(body)?;

        let id = value.get("id").map(|id| match id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        });

        Ok(Self { id })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Nothing checks the id the server sent, a missing one ends up as `/undefined`.
    pub fn redirect_path(&self) -> String {
        format!("/{}", self.id().unwrap_or("undefined"))
    }
}

pub async fn upload<T: Transport>(
    transport: &T,
    endpoint: &str,
    file: T::File,
) -> Result<UploadResult, UploadError> {
    let response = transport.post(endpoint, file).await?;

    if !(200..300).contains(&response.status) {
        return Err(UploadError::Status {
            status: response.status,
        });
    }

    Ok(UploadResult::from_json(&response.body)?)
}

/// Browser fetch, the file is sent as is and the platform picks the content type.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    type File = web_sys::File;

    fn post(
        &self,
        endpoint: &str,
        file: web_sys::File,
    ) -> LocalBoxFuture<'static, Result<RawResponse, UploadError>> {
        use futures::FutureExt as _;

        let endpoint = endpoint.to_string();

        async move { fetch(endpoint, file).await }.boxed_local()
    }
}

async fn fetch(endpoint: String, file: web_sys::File) -> Result<RawResponse, UploadError> {
    use {
        crate::utils::js_error_message,
        wasm_bindgen::{JsCast as _, JsValue},
        wasm_bindgen_futures::JsFuture,
    };

    let transport_error = |e: JsValue| UploadError::Transport(js_error_message(&e));

    debug!("Uploading {} ({} bytes) to {endpoint}", file.name(), file.size());

    let reqinit = web_sys::RequestInit::new();
    reqinit.set_method("POST");
    reqinit.set_body(&JsValue::from(file));

    let request =
        web_sys::Request::new_with_str_and_init(&endpoint, &reqinit).map_err(transport_error)?;

    let window = gloo::utils::window();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?;
    let resp: web_sys::Response = resp_value.dyn_into().map_err(transport_error)?;

    let text = resp.text().map_err(transport_error)?;
    let body = JsFuture::from(text)
        .await
        .map_err(transport_error)?
        .as_string()
        .unwrap_or_default();

    Ok(RawResponse {
        status: resp.status(),
        body,
    })
}
