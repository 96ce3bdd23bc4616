//! Shared domain enums for competitor records.
//!
//! All variants map to lowercase/snake_case text in both JSON payloads and
//! database columns, so `as_str` is the single source of truth for the wire
//! and storage representation.

use serde::{Deserialize, Serialize};

/// How a competitor entity entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySource {
    ExternalApi,
    ManualEntry,
}

impl DiscoverySource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DiscoverySource::ExternalApi => "external_api",
            DiscoverySource::ManualEntry => "manual_entry",
        }
    }
}

/// Broad business model classification for a competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessClassification {
    Online,
    Franchise,
    DealerGroup,
    Local,
}

impl BusinessClassification {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessClassification::Online => "online",
            BusinessClassification::Franchise => "franchise",
            BusinessClassification::DealerGroup => "dealer_group",
            BusinessClassification::Local => "local",
        }
    }
}

/// Urgency/strength tier assigned to a competitor.
///
/// Used for both the priority tier (derived from distance) and the threat
/// tier (derived from rating). `Critical` is reserved for manual escalation;
/// the discovery pipeline only ever assigns `Low`..`High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
    Critical,
}

impl Tier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
            Tier::Critical => "critical",
        }
    }
}

/// Market density bucket for a discovery run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityTier {
    Low,
    Medium,
    High,
}

impl DensityTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DensityTier::Low => "low",
            DensityTier::Medium => "medium",
            DensityTier::High => "high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Tier::Critical).unwrap(),
            "\"critical\""
        );
    }

    #[test]
    fn classification_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&BusinessClassification::DealerGroup).unwrap(),
            "\"dealer_group\""
        );
        assert_eq!(BusinessClassification::DealerGroup.as_str(), "dealer_group");
    }

    #[test]
    fn discovery_source_round_trips() {
        let parsed: DiscoverySource = serde_json::from_str("\"external_api\"").unwrap();
        assert_eq!(parsed, DiscoverySource::ExternalApi);
        assert_eq!(parsed.as_str(), "external_api");
    }

    #[test]
    fn tier_ordering_matches_severity() {
        assert!(Tier::Low < Tier::Medium);
        assert!(Tier::Medium < Tier::High);
        assert!(Tier::High < Tier::Critical);
    }
}
