use {crate::response::Response, rocket::http::Status};

lazy_static! {
    // This regex only match uuid v4
    static ref UUID_VALIDATION_REGEX: regex::Regex = regex::Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
}

#[inline]
fn parse_id(raw_id: &str) -> Result<uuid::Uuid, crate::error::UuidParseError> {
    use {crate::error::UuidParseError, std::str::FromStr, uuid::Uuid};

    if !UUID_VALIDATION_REGEX.is_match(raw_id) {
        return Err(UuidParseError::Regex);
    }

    Uuid::from_str(raw_id).map_err(|_e| UuidParseError::Convert)
}

///
/// This is where the uploader redirects once the upload is done
///
///     Serves the stored bytes back with the content type they were uploaded with,
///     inline so the browser displays what it can.
///     Uploads run on this origin, so scripts are sandboxed and scriptable documents
///     (html, svg, xml, js) are only offered as downloads.
///
#[rocket::get("/<id>")]
pub async fn api_view(id: &str, storage: &rocket::State<crate::storage::Storage>) -> Response {
    use {
        crate::{error::StorageError, response::ResponseBuilder},
        rocket::http::ContentType,
    };

    let uuid = match parse_id(id) {
        Ok(uuid) => uuid,
        Err(e) => {
            warn!("[{id}] Refused view request: {e}");
            return Response::text(Status::BadRequest, format!("Invalid id: {id}"));
        }
    };

    let (metadata, data) = match storage.load(uuid).await {
        Ok(loaded) => loaded,
        Err(StorageError::NotFound { .. }) => {
            warn!("[{uuid}] Requested but not stored");
            return Response::text(Status::NotFound, "Could not find the requested upload");
        }
        Err(e) => {
            error!("[{uuid}] Could not load the upload due to: {e}");
            return Response::text(
                Status::InternalServerError,
                "An error occured while loading the upload",
            );
        }
    };

    let content_type = metadata
        .content_type
        .as_deref()
        .and_then(ContentType::parse_flexible)
        .unwrap_or(ContentType::Binary);

    let disposition = if is_scriptable(&content_type) {
        "attachment"
    } else {
        "inline"
    };

    info!(
        "[{uuid}] Serving {} bytes as {content_type} ({disposition})",
        data.len()
    );

    ResponseBuilder::default()
        .with_status(Status::Ok)
        .with_content(data)
        .with_content_type(content_type)
        .with_header("Content-Disposition", disposition)
        .with_header("X-Content-Type-Options", "nosniff")
        .with_header("Content-Security-Policy", "sandbox")
        .build()
}

/// Types a browser would execute scripts from when rendered.
fn is_scriptable(content_type: &rocket::http::ContentType) -> bool {
    let sub = content_type.sub().as_str().to_ascii_lowercase();

    sub == "html"
        || sub == "xml"
        || sub.ends_with("+xml")
        || sub.contains("javascript")
        || sub.contains("ecmascript")
}
