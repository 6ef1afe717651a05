// --- File: crates/reserva_content/src/data.rs ---
//! The fixed content tables behind the marketing site.
//!
//! Serialized field names stay in Spanish so the emitted snapshot keeps the
//! shape the site's scripts already consume.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceCard {
    pub id: &'static str,
    #[serde(rename = "nombre")]
    pub name: &'static str,
    #[serde(rename = "descripcion")]
    pub description: &'static str,
    #[serde(rename = "icono")]
    pub icon: &'static str,
    /// Tailwind gradient classes for the card header.
    pub color: &'static str,
    #[serde(rename = "textoIcono")]
    pub icon_text: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PricingPlan {
    pub id: &'static str,
    #[serde(rename = "nombre")]
    pub name: &'static str,
    #[serde(rename = "precio")]
    pub price: u32,
    #[serde(rename = "periodo")]
    pub period: &'static str,
    #[serde(rename = "destacado")]
    pub featured: bool,
    #[serde(rename = "etiqueta", skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(rename = "icono")]
    pub icon: &'static str,
    pub color: &'static str,
    #[serde(rename = "ahorro", skip_serializing_if = "Option::is_none")]
    pub savings: Option<u32>,
    #[serde(rename = "beneficios")]
    pub benefits: &'static [&'static str],
}

pub const SERVICES: &[ServiceCard] = &[
    ServiceCard {
        id: "entrenamiento-personalizado",
        name: "Entrenamiento Personalizado",
        description: "Sesiones one-on-one con entrenadores certificados. Planes adaptados a tus objetivos específicos.",
        icon: "fa-dumbbell",
        color: "from-primary-gold to-secondary-mustard",
        icon_text: "text-bg-dark",
    },
    ServiceCard {
        id: "planes-gimnasio",
        name: "Planes de Gimnasio",
        description: "Acceso ilimitado a nuestras instalaciones. Incluye plan estudiante con descuento especial.",
        icon: "fa-calendar-alt",
        color: "from-secondary-red to-secondary-red-bright",
        icon_text: "text-white",
    },
    ServiceCard {
        id: "clases-grupales",
        name: "Clases Grupales",
        description: "Strong Vikings, Power Jump, CrossFit. Ambiente motivador y comunitario.",
        icon: "fa-users",
        color: "from-primary-gold to-secondary-mustard",
        icon_text: "text-bg-dark",
    },
    ServiceCard {
        id: "nutricionista",
        name: "Nutricionista",
        description: "Asesoría nutricional personalizada para complementar tu entrenamiento y alcanzar tus metas.",
        icon: "fa-apple-alt",
        color: "from-secondary-red to-secondary-red-bright",
        icon_text: "text-white",
    },
    ServiceCard {
        id: "kinesiologia",
        name: "Kinesiología",
        description: "Rehabilitación y prevención de lesiones. Recupera y fortalece tu cuerpo.",
        icon: "fa-heartbeat",
        color: "from-primary-gold to-secondary-mustard",
        icon_text: "text-bg-dark",
    },
    ServiceCard {
        id: "sistema-dj",
        name: "Sistema DJ Personalizado",
        description: "Entrena con la mejor música. Ambiente energético único en la zona.",
        icon: "fa-music",
        color: "from-secondary-red to-secondary-red-bright",
        icon_text: "text-white",
    },
];

pub const PLANS: &[PricingPlan] = &[
    PricingPlan {
        id: "plan-estudiante",
        name: "Plan Estudiante",
        price: 16_000,
        period: "mes",
        featured: true,
        label: Some("POPULAR"),
        icon: "fa-graduation-cap",
        color: "primary-gold",
        savings: None,
        benefits: &[
            "Acceso ilimitado al gimnasio",
            "Horario extendido",
            "Descuento especial para estudiantes",
            "Sin permanencia",
        ],
    },
    PricingPlan {
        id: "plan-anual-pac",
        name: "Plan Anual PAC",
        price: 120_000,
        period: "año",
        featured: true,
        label: Some("MEJOR VALOR"),
        icon: "fa-calendar-check",
        color: "secondary-red",
        savings: Some(72_000),
        benefits: &[
            "Acceso ilimitado 12 meses",
            "Sin cuota de inscripción",
            "Descuento del 37%",
            "Pago único o cuotas",
        ],
    },
    PricingPlan {
        id: "clases-grupales",
        name: "Clases Grupales",
        price: 30_000,
        period: "8 clases",
        featured: false,
        label: None,
        icon: "fa-users",
        color: "primary-gold",
        savings: None,
        benefits: &[
            "Strong Vikings",
            "Power Jump",
            "CrossFit",
            "Válido por 2 meses",
        ],
    },
];
