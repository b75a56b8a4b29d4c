// 🗺️ Geography - Region → Department → City hierarchy
//
// A center lives in a city, a city belongs to a department, and a
// department belongs to a region. Patients may only book centers whose
// city is reachable from their region of residence.

use serde::{Deserialize, Serialize};

// ============================================================================
// CITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub postal_code: String,
}

impl City {
    pub fn new(name: String, postal_code: String) -> Self {
        City { name, postal_code }
    }

    /// Key used everywhere a city is referenced: "Versailles (78000)"
    pub fn key(&self) -> String {
        city_key(&self.name, &self.postal_code)
    }
}

pub fn city_key(name: &str, postal_code: &str) -> String {
    format!("{} ({})", name, postal_code)
}

// ============================================================================
// DEPARTMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub code: String,

    /// City keys, in insertion order
    pub cities: Vec<String>,
}

impl Department {
    pub fn new(code: String) -> Self {
        Department {
            code,
            cities: Vec::new(),
        }
    }

    pub fn add_city(&mut self, city_key: &str) {
        if !self.contains_city(city_key) {
            self.cities.push(city_key.to_string());
        }
    }

    pub fn contains_city(&self, city_key: &str) -> bool {
        self.cities.iter().any(|c| c == city_key)
    }
}

// ============================================================================
// REGION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,

    /// Department codes, in insertion order
    pub departments: Vec<String>,
}

impl Region {
    pub fn new(name: String) -> Self {
        Region {
            name,
            departments: Vec::new(),
        }
    }

    pub fn add_department(&mut self, code: &str) {
        if !self.departments.iter().any(|d| d == code) {
            self.departments.push(code.to_string());
        }
    }

    pub fn has_department(&self, code: &str) -> bool {
        self.departments.iter().any(|d| d == code)
    }
}
