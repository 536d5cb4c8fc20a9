use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sequential identifier of a registered model. The first model gets id `1`.
pub type ModelId = u64;

/// Federated training round a model belongs to.
pub type Round = u64;

/// One submission recorded by the model registry.
///
/// Entries are created once by the registry and never modified afterwards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModelEntry<K> {
    /// Sequential id assigned at registration time
    pub id: ModelId,
    /// Training round, as supplied by the submitter
    pub round: Round,
    /// Content-addressed identifier of the stored model artifact
    pub content_id: String,
    /// Free-form metadata, usually serialized evaluation metrics
    pub metadata: String,
    /// Identity that registered the model
    pub submitter: K,
    /// UTC timestamp (seconds) of the registration
    pub timestamp: i64,
}

impl<K> ModelEntry<K> {
    /// Interpret the metadata as a JSON object of metrics, such as `{"acc": 0.9}`.
    ///
    /// Returns `None` when the metadata is empty or is not a JSON object.
    pub fn metrics(&self) -> Option<Map<String, Value>> {
        serde_json::from_str(&self.metadata).ok()
    }
}
