use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CanUploadQuery {
    pub size: u64,
}
