pub struct Response {
    status: rocket::http::Status,
    headers: std::collections::HashMap<String, String>,
    content: Vec<u8>,
    content_type: rocket::http::ContentType,
}

impl Response {
    /// Plain text response, used for every error the api reports.
    pub fn text(status: rocket::http::Status, content: impl Into<String>) -> Self {
        ResponseBuilder::default()
            .with_status(status)
            .with_content(content.into())
            .with_content_type(rocket::http::ContentType::Text)
            .build()
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for Response {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        use {
            rocket::response::{Builder, Response},
            std::io::Cursor,
        };

        let mut resp = Builder::new(Response::default());

        resp.status(self.status);

        resp.raw_header("Content-Type", self.content_type.to_string());

        for (name, value) in self.headers.into_iter() {
            resp.raw_header(name, value);
        }

        resp.sized_body(self.content.len(), Cursor::new(self.content));

        resp.ok()
    }
}

pub struct ResponseBuilder {
    inner: Response,
}

impl ResponseBuilder {
    pub fn with_content(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.inner.content = value.into();
        self
    }

    pub fn with_content_type(mut self, ctype: rocket::http::ContentType) -> Self {
        self.inner.content_type = ctype;
        self
    }

    pub fn with_status(mut self, status: rocket::http::Status) -> Self {
        self.inner.status = status;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.inner
            .headers
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> Response {
        self.inner
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        use {
            rocket::http::{ContentType, Status},
            std::collections::HashMap,
        };

        ResponseBuilder {
            inner: Response {
                status: Status::Ok,
                headers: HashMap::new(),
                content: Vec::new(),
                content_type: ContentType::Any,
            },
        }
    }
}
