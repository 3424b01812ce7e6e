use serde::{Deserialize, Serialize};

pub mod list;
pub mod new;
pub mod run;

/// On-disk YAML shape of a stored chain definition.
#[derive(Serialize, Deserialize, Debug)]
pub struct ChainFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub steps: Vec<String>,
}
