// --- File: crates/reserva_content/src/lib.rs ---
// Declare modules within this crate
pub mod data;
pub mod html;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use data::{PricingPlan, ServiceCard, PLANS, SERVICES};
pub use html::{render_plan_cards, render_service_cards};

/// The JSON snapshot written next to the HTML fragments.
#[derive(Debug, Serialize)]
pub struct SiteSnapshot<'a> {
    pub servicios: &'a [ServiceCard],
    pub planes: &'a [PricingPlan],
    pub actualizado: DateTime<Utc>,
}

impl<'a> SiteSnapshot<'a> {
    pub fn current() -> Self {
        Self {
            servicios: SERVICES,
            planes: PLANS,
            actualizado: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_with_the_site_keys() {
        let snapshot = SiteSnapshot::current();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["servicios"].as_array().unwrap().len(), SERVICES.len());
        assert_eq!(json["planes"].as_array().unwrap().len(), PLANS.len());
        assert!(json["actualizado"].is_string());
        // Spanish field names are preserved on the wire
        assert_eq!(
            json["servicios"][0]["nombre"],
            "Entrenamiento Personalizado"
        );
        assert_eq!(json["planes"][0]["precio"], 16_000);
        // Absent optional fields stay absent instead of null
        assert!(json["planes"][2].get("etiqueta").is_none());
    }
}
