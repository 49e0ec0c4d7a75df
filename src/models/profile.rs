//! Business profile used to pick a benchmark table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad business classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    #[default]
    General,
    Retail,
    Restaurant,
    Technology,
    ProfessionalServices,
    Construction,
    Healthcare,
}

impl BusinessType {
    pub const ALL: [BusinessType; 7] = [
        Self::General,
        Self::Retail,
        Self::Restaurant,
        Self::Technology,
        Self::ProfessionalServices,
        Self::Construction,
        Self::Healthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Retail => "retail",
            Self::Restaurant => "restaurant",
            Self::Technology => "technology",
            Self::ProfessionalServices => "professional_services",
            Self::Construction => "construction",
            Self::Healthcare => "healthcare",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::General => "General",
            Self::Retail => "Retail",
            Self::Restaurant => "Restaurant",
            Self::Technology => "Technology",
            Self::ProfessionalServices => "Professional Services",
            Self::Construction => "Construction",
            Self::Healthcare => "Healthcare",
        };
        f.write_str(name)
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "general" | "other" => Ok(Self::General),
            "retail" | "ecommerce" | "e_commerce" => Ok(Self::Retail),
            "restaurant" | "hospitality" | "food" => Ok(Self::Restaurant),
            "technology" | "tech" | "saas" | "software" => Ok(Self::Technology),
            "professional_services" | "services" | "consulting" | "agency" => {
                Ok(Self::ProfessionalServices)
            }
            "construction" | "trades" => Ok(Self::Construction),
            "healthcare" | "medical" | "health" => Ok(Self::Healthcare),
            other => Err(format!(
                "Unknown business type '{}'. Expected one of: {}",
                other,
                Self::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Static classification of the business being analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BusinessProfile {
    #[serde(default)]
    pub business_type: BusinessType,
    /// Free-form industry description, shown in recommendations
    #[serde(default)]
    pub industry: String,
}

impl BusinessProfile {
    pub fn new(business_type: BusinessType, industry: impl Into<String>) -> Self {
        Self {
            business_type,
            industry: industry.into(),
        }
    }

    /// Name used when talking about peers ("Retail businesses")
    pub fn peer_label(&self) -> String {
        if self.industry.trim().is_empty() {
            format!("{} businesses", self.business_type)
        } else {
            format!("{} businesses", self.industry.trim())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_type_from_str() {
        assert_eq!("SaaS".parse::<BusinessType>(), Ok(BusinessType::Technology));
        assert_eq!(
            "professional services".parse::<BusinessType>(),
            Ok(BusinessType::ProfessionalServices)
        );
        assert!("aerospace".parse::<BusinessType>().is_err());
    }

    #[test]
    fn test_as_str_round_trips() {
        for kind in BusinessType::ALL {
            assert_eq!(kind.as_str().parse::<BusinessType>(), Ok(kind));
        }
    }

    #[test]
    fn test_peer_label() {
        let profile = BusinessProfile::new(BusinessType::Retail, "");
        assert_eq!(profile.peer_label(), "Retail businesses");
        let profile = BusinessProfile::new(BusinessType::Retail, "Coffee roasting");
        assert_eq!(profile.peer_label(), "Coffee roasting businesses");
    }
}
