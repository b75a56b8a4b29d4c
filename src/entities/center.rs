// 🏥 Care Center - a facility in a city, with its staff roster

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    /// Identity
    pub name: String,

    /// City key ("Name (postal code)")
    pub city: String,

    /// Emails of attached staff, in attachment order
    pub staff: Vec<String>,
}

impl Center {
    pub fn new(name: String, city: String) -> Self {
        Center {
            name,
            city,
            staff: Vec::new(),
        }
    }

    pub fn has_staff(&self, email: &str) -> bool {
        self.staff.iter().any(|s| s == email)
    }

    /// Roster side of an attachment (see `Staff::attach`)
    pub fn add_staff(&mut self, email: &str) {
        if !self.has_staff(email) {
            self.staff.push(email.to_string());
        }
    }
}
