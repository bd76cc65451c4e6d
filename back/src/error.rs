#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Could not create the storage directory '{dir}' due to: {why}")]
    DirCreate { dir: String, why: std::io::Error },

    #[error("Could not write to file '{file}' due to: {why}")]
    FileWrite { file: String, why: std::io::Error },

    #[error("Could not read file '{file}' due to: {why}")]
    FileRead { file: String, why: std::io::Error },

    #[error("Could not compress the given data due to {why}")]
    Compression { why: std::io::Error },

    #[error("Could not decompress the stored data due to {why}")]
    Decompression { why: std::io::Error },

    #[error("The id '{id}' doesn't correspond to any upload")]
    NotFound { id: uuid::Uuid },

    #[error("Serialization error while {context} due to {why}")]
    Serialization {
        context: String, // Extremely short description of what was atempted to do
        why: rocket::serde::json::serde_json::Error,
    },

    #[error("Could not deserialize file '{file}' due to: {why}")]
    Deserialization {
        file: String,
        why: rocket::serde::json::serde_json::Error,
    },

    #[error("Compression worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum UuidParseError {
    #[error("Failled the regex check")]
    Regex,
    #[error("Could not convert given UUID")]
    Convert,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Could not read the '{key}' config value due to: {why}")]
    Config {
        key: &'static str,
        why: rocket::figment::Error,
    },

    #[error("Could not set up the storage: {0}")]
    Storage(#[from] StorageError),

    #[error("Could not ignite the server: {0}")]
    Rocket(#[from] rocket::Error),
}
