#[macro_use(trace, debug, info, warn, error)]
extern crate log;

#[macro_use(lazy_static)]
extern crate lazy_static;

mod catchers;
mod error;
mod response;
mod routes;
mod storage;

const DEFAULT_STORAGE_DIR: &str = "./storage";

pub async fn build_rocket() -> Result<rocket::Rocket<rocket::Ignite>, error::BuildError> {
    build_rocket_with(rocket::Config::figment()).await
}

// Needed for tests
pub async fn build_rocket_with(
    figment: rocket::figment::Figment,
) -> Result<rocket::Rocket<rocket::Ignite>, error::BuildError> {
    use {error::BuildError, std::path::PathBuf};

    let storage_dir = match figment.extract_inner::<PathBuf>("storage_dir") {
        Ok(dir) => dir,
        Err(e) if e.missing() => PathBuf::from(DEFAULT_STORAGE_DIR),
        Err(e) => {
            return Err(BuildError::Config {
                key: "storage_dir",
                why: e,
            })
        }
    };

    let storage = storage::Storage::new(storage_dir)?;

    let rocket = rocket::custom(figment)
        .manage(storage)
        .register("/", rocket::catchers![catchers::root_404])
        .register(
            "/upload",
            rocket::catchers![catchers::upload_400, catchers::upload_413],
        )
        .mount(
            "/",
            rocket::routes![
                routes::root,
                routes::index_html,
                routes::front_js,
                routes::front_bg_wasm,
                routes::favicon_ico,
                routes::static_css,
                routes::api_upload,
                routes::api_view,
            ],
        )
        .ignite()
        .await?;

    Ok(rocket)
}

#[rocket::main]
async fn main() {
    let filters = [("rocket", log::LevelFilter::Warn)];
    logger::init([
        logger::Config::default()
            .output(logger::Output::Stdout)
            .colored(true)
            .filters(&filters),
        logger::Config::default()
            .output(logger::Output::new_timed_file(
                "./log/.log",
                std::time::Duration::from_secs(86400), // A day
            ))
            .filters(&filters),
    ]);

    // Small print to show the start of the program log in the file
    trace!(
        "\n╭{line}╮\n│{message:^30}│\n╰{line}╯",
        line = "─".repeat(30),
        message = "Program start"
    );

    let rocket = match build_rocket().await {
        Ok(rocket) => rocket,
        Err(e) => {
            error!("{e}");
            std::process::exit(1)
        }
    };

    display_config(rocket.config(), rocket.routes(), rocket.catchers());

    if let Err(e) = rocket.launch().await {
        error!("Server stopped unexpectedly: {e}");
        std::process::exit(1)
    }
}

/// Displays the config in the console
fn display_config<'a>(
    rocket_cfg: &rocket::Config,
    rocket_routes: impl Iterator<Item = &'a rocket::Route>,
    rocket_catchers: impl Iterator<Item = &'a rocket::Catcher>,
) {
    let profile = rocket_cfg.profile.as_str().as_str();
    let address = rocket_cfg.address;
    let port = rocket_cfg.port;
    let workers = rocket_cfg.workers;
    let limits = ["bytes", "file", "json", "string"]
        .iter()
        .map(|limit_name| {
            format!(
                "{limit_name}: {}",
                rocket_cfg
                    .limits
                    .get(limit_name)
                    .unwrap_or(rocket::data::ByteUnit::from(0))
            )
        })
        .collect::<Vec<String>>();
    let keep_alive_s = rocket_cfg.keep_alive;

    let routes = rocket_routes
        .map(|route| {
            let uri = route.uri.origin.to_string();
            let name = route
                .name
                .as_ref()
                .map(std::borrow::Cow::as_ref)
                .unwrap_or("[ERROR] Undefined");
            let method = route.method.as_str();
            format!("{method:<5} {uri:<20} {name}")
        })
        .collect::<Vec<String>>();

    let catchers = rocket_catchers
        .map(|catcher| {
            let base = catcher.base().to_string();
            let name = catcher
                .name
                .as_ref()
                .map(std::borrow::Cow::as_ref)
                .unwrap_or("[ERROR] Undefined");
            let code = catcher
                .code
                .map(|code| code.to_string())
                .unwrap_or("[ERROR] Undefined".to_string());

            format!("{code:<5} {base:<20} {name}")
        })
        .collect::<Vec<String>>();

    let display_vec = |data: Vec<String>| -> String {
        let mut out = String::from("[\n");
        for d in data {
            out.push_str(&format!("    {d}\n"));
        }
        out.push(']');
        out
    };

    info!("\nConfig:\nUsing profile: {profile}\nAddress: {address}:{port}\nWorkers: {workers}\nLimits: {formatted_limits}\nConnection lifetime: {keep_alive_s}s\nRoutes: {formatted_routes}\nCatchers: {formatted_catchers}",
        formatted_limits = display_vec(limits),
        formatted_routes = display_vec(routes),
        formatted_catchers = display_vec(catchers)
    );
}

#[cfg(test)]
pub async fn test_client() -> rocket::local::asynchronous::Client {
    use rocket::data::{Limits, ToByteUnit as _};

    let storage_dir =
        std::env::temp_dir().join(format!("dropshare-test-{}", uuid::Uuid::new_v4()));
    let figment = rocket::Config::figment()
        .merge(("storage_dir", storage_dir))
        .merge(("limits", Limits::default().limit("file", 1.kibibytes())));

    rocket::local::asynchronous::Client::tracked(
        build_rocket_with(figment)
            .await
            .expect("valid rocket instance"),
    )
    .await
    .expect("valid rocket instance")
}
