// --- File: crates/reserva_content/src/html.rs ---
//! HTML fragment rendering for the marketing site.

use crate::data::{PricingPlan, ServiceCard};

/// Chilean-peso price formatting: thousands grouped with dots, no decimals.
pub fn format_clp(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// One card per service, in table order.
pub fn render_service_cards(services: &[ServiceCard]) -> String {
    services
        .iter()
        .map(|service| {
            format!(
                r##"
    <div class="bg-white rounded-lg shadow-xl overflow-hidden hover:shadow-2xl transition-shadow">
      <div class="h-48 bg-gradient-to-br {color} flex items-center justify-center">
        <i class="fas {icon} text-6xl {icon_text}"></i>
      </div>
      <div class="p-6">
        <h3 class="font-bold text-2xl mb-3">{name}</h3>
        <p class="text-gray-700 mb-4">{description}</p>
        <a href="#contacto" class="text-secondary-red font-bold hover:underline">
          Más información <i class="fas fa-arrow-right ml-1"></i>
        </a>
      </div>
    </div>
  "##,
                color = service.color,
                icon = service.icon,
                icon_text = service.icon_text,
                name = service.name,
                description = service.description,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_label(plan: &PricingPlan) -> String {
    match plan.label {
        Some(label) => {
            let text_class = if plan.color == "primary-gold" {
                "text-bg-dark"
            } else {
                "text-white"
            };
            format!(
                r#"
      <div class="absolute top-0 right-0 bg-{color} {text_class} px-4 py-1 rounded-bl-lg font-bold">
        {label}
      </div>
    "#,
                color = plan.color,
                text_class = text_class,
                label = label,
            )
        }
        None => String::new(),
    }
}

fn render_savings(plan: &PricingPlan) -> String {
    match plan.savings {
        Some(savings) => format!(
            r#"
      <p class="text-sm text-gray-600">Ahorra ${} al año</p>
    "#,
            format_clp(savings)
        ),
        None => String::new(),
    }
}

fn render_benefits(plan: &PricingPlan) -> String {
    plan.benefits
        .iter()
        .map(|benefit| {
            format!(
                r#"
            <li class="flex items-start">
              <i class="fas fa-check text-{color} mr-2 mt-1"></i>
              <span>{benefit}</span>
            </li>
          "#,
                color = plan.color,
                benefit = benefit,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One card per pricing plan, in table order.
pub fn render_plan_cards(plans: &[PricingPlan]) -> String {
    plans
        .iter()
        .map(|plan| {
            let featured_class = if plan.featured {
                format!("border-2 border-{} relative", plan.color)
            } else {
                format!("border-2 border-{}", plan.color)
            };
            let button_class = if plan.color == "primary-gold" {
                "btn-primary"
            } else {
                "btn-secondary-red"
            };
            format!(
                r##"
      <div class="bg-white rounded-lg shadow-xl p-8 {featured_class}">
        {label}
        <div class="text-center mb-6">
          <i class="fas {icon} text-5xl text-{color} mb-4"></i>
          <h3 class="font-syncopate text-2xl font-bold mb-2">{name}</h3>
          <div class="text-4xl font-bold text-bg-dark mb-2">
            ${price}<span class="text-lg text-gray-600">/{period}</span>
          </div>
          {savings}
        </div>
        <ul class="space-y-3 mb-6">
          {benefits}
        </ul>
        <a href="#contacto" class="{button_class} w-full text-center block">
          Contratar Plan
        </a>
      </div>
    "##,
                featured_class = featured_class,
                label = render_label(plan),
                icon = plan.icon,
                color = plan.color,
                name = plan.name,
                price = format_clp(plan.price),
                period = plan.period,
                savings = render_savings(plan),
                benefits = render_benefits(plan),
                button_class = button_class,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PLANS, SERVICES};

    #[test]
    fn clp_prices_group_thousands_with_dots() {
        assert_eq!(format_clp(0), "0");
        assert_eq!(format_clp(999), "999");
        assert_eq!(format_clp(16_000), "16.000");
        assert_eq!(format_clp(120_000), "120.000");
        assert_eq!(format_clp(1_234_567), "1.234.567");
    }

    #[test]
    fn one_card_is_rendered_per_service() {
        let html = render_service_cards(SERVICES);
        assert_eq!(html.matches("<h3").count(), SERVICES.len());
        for service in SERVICES {
            assert!(html.contains(service.name), "missing card for {}", service.name);
            assert!(html.contains(service.icon));
        }
    }

    #[test]
    fn one_card_is_rendered_per_plan_with_formatted_price() {
        let html = render_plan_cards(PLANS);
        assert_eq!(html.matches("Contratar Plan").count(), PLANS.len());
        assert!(html.contains("$16.000"));
        assert!(html.contains("$120.000"));
        assert!(html.contains("Ahorra $72.000 al año"));
    }

    #[test]
    fn only_labelled_plans_carry_a_badge() {
        let html = render_plan_cards(PLANS);
        assert!(html.contains("POPULAR"));
        assert!(html.contains("MEJOR VALOR"));
        let badges = html.matches("rounded-bl-lg").count();
        assert_eq!(badges, PLANS.iter().filter(|p| p.label.is_some()).count());
    }
}
