#[path = "routes/upload.rs"] // Naming conflict in main when registering route
mod upload_route;
#[path = "routes/view.rs"]
mod view_route;

#[allow(unused_imports)] // Used by main.rs
pub use upload_route::*;
#[allow(unused_imports)] // Used by main.rs
pub use view_route::*;

use rocket::tokio::io::AsyncReadExt;

#[rocket::get("/")]
pub async fn root(remote_addr: std::net::SocketAddr) -> crate::response::Response {
    use rocket::http::ContentType;

    static_file_response("index.html", ContentType::HTML, remote_addr).await
}

#[rocket::get("/index.html")]
pub async fn index_html(remote_addr: std::net::SocketAddr) -> crate::response::Response {
    use rocket::http::ContentType;

    static_file_response("index.html", ContentType::HTML, remote_addr).await
}

#[rocket::get("/front.js")]
pub async fn front_js(remote_addr: std::net::SocketAddr) -> crate::response::Response {
    use rocket::http::ContentType;

    static_file_response("front.js", ContentType::JavaScript, remote_addr).await
}

#[rocket::get("/front_bg.wasm")]
pub async fn front_bg_wasm(remote_addr: std::net::SocketAddr) -> crate::response::Response {
    use rocket::http::ContentType;

    static_file_response("front_bg.wasm", ContentType::WASM, remote_addr).await
}

#[rocket::get("/favicon.ico")]
pub async fn favicon_ico(remote_addr: std::net::SocketAddr) -> crate::response::Response {
    use rocket::http::ContentType;

    static_file_response("favicon.ico", ContentType::Icon, remote_addr).await
}

// Not a FileServer, the root get path belongs to the uploads
#[rocket::get("/css/<file>")]
pub async fn static_css(
    file: &str,
    remote_addr: std::net::SocketAddr,
) -> crate::response::Response {
    use rocket::http::{ContentType, Status};

    const ALLOWED_FILES: &[&str] = &["style.css", "notification.css"];

    if !ALLOWED_FILES.contains(&file) {
        return crate::response::ResponseBuilder::default()
            .with_status(Status::NotFound)
            .build();
    }

    static_file_response(&format!("css/{file}"), ContentType::CSS, remote_addr).await
}

async fn static_file_response(
    path: &str,
    content_type: rocket::http::ContentType,
    remote_addr: std::net::SocketAddr,
) -> crate::response::Response {
    use rocket::http::Status;

    async fn read_static(path: &str, remote_addr: std::net::SocketAddr) -> Option<Vec<u8>> {
        let mut buffer = Vec::new();

        let size = rocket::tokio::fs::File::open(format!("./static/{path}"))
            .await
            .map_err(|e| warn!("Could not open static file {path} due to: {e}"))
            .ok()?
            .read_to_end(&mut buffer)
            .await
            .ok()?;

        trace!("Static file query from {remote_addr}: {path} ({size} bytes)");
        Some(buffer)
    }

    match read_static(path, remote_addr).await {
        Some(bytes) => crate::response::ResponseBuilder::default()
            .with_status(Status::Ok)
            .with_content(bytes)
            .with_content_type(content_type)
            .build(),
        None => crate::response::ResponseBuilder::default()
            .with_status(Status::NotFound)
            .build(),
    }
}
