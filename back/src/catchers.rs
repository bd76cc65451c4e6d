#[rocket::catch(404)]
pub async fn root_404(req: &rocket::Request<'_>) -> crate::response::Response {
    use {
        rocket::{http::Status, outcome::Outcome, request::FromRequest as _},
        rocket_client_addr::ClientAddr,
    };

    let addr_string = if let Outcome::Success(addr) = ClientAddr::from_request(req).await {
        addr.get_ipv4_string()
            .unwrap_or_else(|| addr.get_ipv6_string())
    } else {
        "UNKNOWN ADDRESS".to_string()
    };

    warn!(
        "[{addr_string}] has hit a 404 with {} at {} {}",
        req.method(),
        req.uri(),
        req.content_type()
            .map(|t| format!("({t})"))
            .unwrap_or_default()
    );

    crate::response::Response::text(Status::NotFound, "Nothing here")
}

#[rocket::catch(400)]
pub fn upload_400(_req: &rocket::Request<'_>) -> crate::response::Response {
    use rocket::http::Status;

    crate::response::Response::text(Status::BadRequest, "Could not understand the given data.")
}

#[rocket::catch(413)]
pub fn upload_413(req: &rocket::Request<'_>) -> crate::response::Response {
    use rocket::http::Status;

    let limit = req
        .limits()
        .get("file")
        .map(|limit| limit.to_string())
        .unwrap_or_else(|| String::from("unknown"));

    crate::response::Response::text(
        Status::PayloadTooLarge,
        format!("Data too large, {limit} max"),
    )
}
