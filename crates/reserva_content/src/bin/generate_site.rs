// --- File: crates/reserva_content/src/bin/generate_site.rs ---
//! Regenerates the static marketing fragments and the JSON snapshot.
//!
//! Usage: generate-site [output-dir]   (defaults to "dist")

use reserva_content::{render_plan_cards, render_service_cards, SiteSnapshot, PLANS, SERVICES};
use std::fs;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    reserva_common::logging::init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let fragments_dir = output_dir.join("fragments");
    fs::create_dir_all(&fragments_dir)?;

    let services_html = render_service_cards(SERVICES);
    fs::write(fragments_dir.join("services.html"), &services_html)?;
    info!("{} service cards rendered", SERVICES.len());

    let plans_html = render_plan_cards(PLANS);
    fs::write(fragments_dir.join("plans.html"), &plans_html)?;
    info!("{} pricing plans rendered", PLANS.len());

    let snapshot = SiteSnapshot::current();
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(output_dir.join("data.json"), json)?;
    info!("Snapshot written to {}", output_dir.join("data.json").display());

    Ok(())
}
