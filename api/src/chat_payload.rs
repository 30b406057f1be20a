use serde::Deserialize;

#[derive(Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub input: String,
}
