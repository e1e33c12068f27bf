use serde::{Deserialize, Serialize};

/// Identifiers carried by a table QR code.
///
/// Produced once per scan and passed explicitly into every fetch. Any field
/// the code did not carry is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedIdentifiers {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub location_id: String,
    /// Table or sub-location within the location.
    #[serde(default)]
    pub outpost: String,
}

impl ScannedIdentifiers {
    #[must_use]
    pub fn new(
        merchant_id: impl Into<String>,
        location_id: impl Into<String>,
        outpost: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            location_id: location_id.into(),
            outpost: outpost.into(),
        }
    }

    /// `true` when every field is empty, i.e. the scan degraded completely.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merchant_id.is_empty() && self.location_id.is_empty() && self.outpost.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Wire names of the fields that are empty.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("merchantId", &self.merchant_id),
            ("locationId", &self.location_id),
            ("outpost", &self.outpost),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Returns a copy where each non-empty field of `overrides` replaces ours.
    #[must_use]
    pub fn merged_with(&self, overrides: &ScannedIdentifiers) -> Self {
        let pick = |ours: &String, theirs: &String| {
            if theirs.is_empty() {
                ours.clone()
            } else {
                theirs.clone()
            }
        };
        Self {
            merchant_id: pick(&self.merchant_id, &overrides.merchant_id),
            location_id: pick(&self.location_id, &overrides.location_id),
            outpost: pick(&self.outpost, &overrides.outpost),
        }
    }
}
