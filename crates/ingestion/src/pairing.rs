//! Primary/linked asset pairing by filename stem

use std::collections::HashMap;
use std::path::PathBuf;

use contracts::{stem_of, ContractError};

/// A primary asset and its linked asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPair {
    pub primary: PathBuf,
    pub linked: PathBuf,
}

impl AssetPair {
    pub fn stem(&self) -> String {
        stem_of(&self.primary)
    }
}

/// Pair every primary asset with the linked asset of the same stem.
///
/// Fails when counts differ or a primary has no partner. Output follows the
/// order of `primaries`.
pub fn pair_assets(
    primaries: &[PathBuf],
    linked: &[PathBuf],
) -> Result<Vec<AssetPair>, ContractError> {
    if primaries.len() != linked.len() {
        return Err(ContractError::AssetCountMismatch {
            primary: primaries.len(),
            linked: linked.len(),
        });
    }

    let by_stem: HashMap<String, &PathBuf> = linked.iter().map(|p| (stem_of(p), p)).collect();

    primaries
        .iter()
        .map(|primary| {
            by_stem
                .get(&stem_of(primary))
                .map(|linked| AssetPair {
                    primary: primary.clone(),
                    linked: (*linked).clone(),
                })
                .ok_or_else(|| ContractError::UnpairedAsset {
                    path: primary.clone(),
                })
        })
        .collect()
}
