use {
    crate::{response::Response, storage::Storage},
    rocket::{
        data::{Data, Limits, ToByteUnit as _},
        http::{ContentType, Status},
        serde::json::serde_json::json,
    },
};

/// Accepts the raw bytes of a single file and answers with the id it's reachable at.
///
/// Unreadable and oversized bodies are answered by the `/upload` catchers.
#[rocket::post("/upload", data = "<raw_data>")]
pub async fn api_upload(
    raw_data: Data<'_>,
    content_type: Option<&ContentType>,
    limits: &Limits,
    storage: &rocket::State<Storage>,
) -> Result<Response, Status> {
    use {crate::response::ResponseBuilder, std::time::Instant, uuid::Uuid};

    let start_timer = Instant::now();

    let id = Uuid::new_v4();

    let limit = limits.get("file").unwrap_or(1.gibibytes());

    let capped_data = match raw_data.open(limit).into_bytes().await {
        Ok(data) => data,
        Err(e) => {
            error!("[{id}] Could not read the given data: {e}");
            return Err(Status::BadRequest);
        }
    };

    if !capped_data.is_complete() {
        error!("[{id}] Data too large, limit is {limit}");
        return Err(Status::PayloadTooLarge);
    }

    let data = capped_data.into_inner();
    let content_type = content_type.map(ToString::to_string);

    debug!(
        "Received new upload request\nUsing id: {id}\nContent type: {}\nFile size: {}",
        content_type.as_deref().unwrap_or("None"),
        data.len()
    );

    if let Err(e) = storage.store(id, content_type, data).await {
        error!("[{id}] An error occured while storing the given data: {e}");
        return Ok(Response::text(
            Status::InternalServerError,
            "An error occured while storing the data",
        ));
    }

    info!(
        "[{id}] Responded in {}",
        time::format(start_timer.elapsed(), 2)
    );

    Ok(ResponseBuilder::default()
        .with_status(Status::Created)
        .with_content(json!({ "id": id.hyphenated().to_string() }).to_string())
        .with_content_type(ContentType::JSON)
        .build())
}
