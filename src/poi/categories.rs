//! Business category mapping
//!
//! Maps a business type to the provider category code sets used when
//! querying for competitors and complements, and classifies complement
//! categories into access/demand buckets for factor accumulation. Category
//! taxonomies are data, not control flow; the classifier sets can be
//! replaced without touching the scoring algorithm.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supported business types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Coffee,
    Pharmacy,
    Grocery,
    Fitness,
    KidsServices,
}

impl Default for BusinessType {
    fn default() -> Self {
        Self::Coffee
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coffee => write!(f, "coffee"),
            Self::Pharmacy => write!(f, "pharmacy"),
            Self::Grocery => write!(f, "grocery"),
            Self::Fitness => write!(f, "fitness"),
            Self::KidsServices => write!(f, "kids_services"),
        }
    }
}

impl std::str::FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coffee" => Ok(Self::Coffee),
            "pharmacy" => Ok(Self::Pharmacy),
            "grocery" => Ok(Self::Grocery),
            "fitness" => Ok(Self::Fitness),
            "kids_services" | "kids-services" | "kidsservices" => Ok(Self::KidsServices),
            _ => Err(format!("Unknown business type: {}", s)),
        }
    }
}

/// List all supported business types
pub fn available_businesses() -> Vec<BusinessType> {
    vec![
        BusinessType::Coffee,
        BusinessType::Pharmacy,
        BusinessType::Grocery,
        BusinessType::Fitness,
        BusinessType::KidsServices,
    ]
}

/// Provider category code sets for one business type
#[derive(Debug, Clone)]
pub struct CategorySets {
    pub competitors: Vec<&'static str>,
    pub complements: Vec<&'static str>,
}

/// Complement category codes shared by every business type: places that
/// bring people near a storefront regardless of what it sells
const COMMON_COMPLEMENTS: [&str; 5] = [
    "POI_PARKING",
    "POI_PUBLIC_TRANSPORT_STATION",
    "POI_SCHOOL",
    "POI_OFFICE",
    "POI_APARTMENT",
];

/// Category code sets for a business type
pub fn category_sets(business: BusinessType) -> CategorySets {
    let (competitors, extra_complements): (Vec<&'static str>, Vec<&'static str>) = match business {
        BusinessType::Coffee => (
            vec!["CAFE_PUB", "COFFEE_SHOP"],
            vec!["SHOPPING_CENTER", "BAKERY", "BOOK_STORE"],
        ),
        BusinessType::Pharmacy => (
            vec!["PHARMACY"],
            vec!["DOCTOR", "DENTIST", "HOSPITAL_POLYCLINIC"],
        ),
        BusinessType::Grocery => (
            vec!["SUPERMARKET", "CONVENIENCE_STORE"],
            vec!["SHOPPING_CENTER", "MARKET"],
        ),
        BusinessType::Fitness => (
            vec!["SPORTS_CENTER", "GYM"],
            vec!["PARK_RECREATION_AREA", "SHOPPING_CENTER"],
        ),
        BusinessType::KidsServices => (
            vec!["KINDERGARTEN", "PLAY_CENTER"],
            vec!["TOY_STORE", "PARK_RECREATION_AREA"],
        ),
    };

    let mut complements = extra_complements;
    complements.extend(COMMON_COMPLEMENTS);
    CategorySets {
        competitors,
        complements,
    }
}

/// Set-membership classifier for access/demand factor accumulation
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    access: HashSet<String>,
    demand: HashSet<String>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self {
            access: ["POI_PARKING", "POI_PUBLIC_TRANSPORT_STATION"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            demand: ["POI_SCHOOL", "POI_OFFICE", "POI_APARTMENT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CategoryClassifier {
    /// Build a classifier from explicit access and demand code sets
    pub fn new<I, J, S>(access: I, demand: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            access: access.into_iter().map(Into::into).collect(),
            demand: demand.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a category code signals accessibility (parking, transit)
    pub fn is_access(&self, category: Option<&str>) -> bool {
        category.is_some_and(|c| self.access.contains(c))
    }

    /// Whether a category code signals demand (schools, offices, housing)
    pub fn is_demand(&self, category: Option<&str>) -> bool {
        category.is_some_and(|c| self.demand.contains(c))
    }
}
