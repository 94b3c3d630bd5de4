//! Dictionary construction settings.

use crate::dict::AuthDict;
use crate::error::ProofError;
use crate::key::DictKey;
use serde::{Deserialize, Serialize};

/// Settings for constructing an [`AuthDict`].
///
/// ```
/// use auth_skiplist::DictConfig;
///
/// let config = DictConfig::from_json_str(r#"{"seed": 7}"#).unwrap();
/// let dict = config.build([3, 1, 2]);
/// assert_eq!(dict.keys().collect::<Vec<i32>>(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictConfig {
    /// Seed for the promotion coins.  `None` draws from system entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl DictConfig {
    /// Parses settings from JSON.  Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ProofError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Builds a dictionary over `keys` with these settings.
    pub fn build<K, I>(&self, keys: I) -> AuthDict<K>
    where
        K: DictKey,
        I: IntoIterator<Item = K>,
    {
        match self.seed {
            Some(seed) => AuthDict::from_keys_with_seed(keys, seed),
            None => AuthDict::from_keys(keys),
        }
    }
}
