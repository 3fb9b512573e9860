use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Where a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    FacebookAds,
    GoogleAds,
    Referral,
    Events,
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::FacebookAds => "facebook_ads",
            LeadSource::GoogleAds => "google_ads",
            LeadSource::Referral => "referral",
            LeadSource::Events => "events",
            LeadSource::Other => "other",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(LeadSource::Website),
            "facebook_ads" => Ok(LeadSource::FacebookAds),
            "google_ads" => Ok(LeadSource::GoogleAds),
            "referral" => Ok(LeadSource::Referral),
            "events" => Ok(LeadSource::Events),
            "other" => Ok(LeadSource::Other),
            _ => Err(format!("Unknown lead source: {}", s)),
        }
    }
}

/// Pipeline position of a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Lost,
    Won,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Lost => "lost",
            LeadStatus::Won => "won",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "qualified" => Ok(LeadStatus::Qualified),
            "lost" => Ok(LeadStatus::Lost),
            "won" => Ok(LeadStatus::Won),
            _ => Err(format!("Unknown lead status: {}", s)),
        }
    }
}
