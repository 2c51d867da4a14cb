//! Static service catalog for the salon.
//!
//! The catalog is a fixed in-memory table, not persisted; it changes only
//! with a redeploy.

use once_cell::sync::Lazy;
use shared::Service;

static SERVICES: Lazy<Vec<Service>> = Lazy::new(|| {
    vec![
        Service {
            name: "Classic Manicure".to_string(),
            price: 25,
            duration_label: "30-40 min".to_string(),
            duration_minutes: 40,
            description: "A clean, polished look for everyday wear".to_string(),
            features: vec![
                "Nail shaping".to_string(),
                "Cuticle care".to_string(),
                "Polish of your choice".to_string(),
                "Hand massage".to_string(),
            ],
        },
        Service {
            name: "Gel Manicure".to_string(),
            price: 45,
            duration_label: "45-60 min".to_string(),
            duration_minutes: 60,
            description: "Chip-resistant gel color that lasts up to three weeks".to_string(),
            features: vec![
                "Nail shaping".to_string(),
                "Cuticle care".to_string(),
                "Gel color application".to_string(),
                "LED curing".to_string(),
            ],
        },
        Service {
            name: "Classic Pedicure".to_string(),
            price: 40,
            duration_label: "45-55 min".to_string(),
            duration_minutes: 55,
            description: "Relaxing foot soak and full pedicure".to_string(),
            features: vec![
                "Warm foot soak".to_string(),
                "Callus smoothing".to_string(),
                "Nail shaping".to_string(),
                "Polish of your choice".to_string(),
            ],
        },
        Service {
            name: "Spa Pedicure".to_string(),
            price: 55,
            duration_label: "60-75 min".to_string(),
            duration_minutes: 75,
            description: "Our signature pedicure with sugar scrub and hot towels".to_string(),
            features: vec![
                "Aromatherapy soak".to_string(),
                "Sugar scrub exfoliation".to_string(),
                "Hot towel wrap".to_string(),
                "Extended massage".to_string(),
            ],
        },
        Service {
            name: "Full Set Acrylics".to_string(),
            price: 65,
            duration_label: "75-90 min".to_string(),
            duration_minutes: 90,
            description: "Sculpted acrylic extensions in the shape and length you want".to_string(),
            features: vec![
                "Custom length and shape".to_string(),
                "Acrylic application".to_string(),
                "Color or french finish".to_string(),
            ],
        },
        Service {
            name: "Nail Art Add-On".to_string(),
            price: 15,
            duration_label: "15-30 min".to_string(),
            duration_minutes: 30,
            description: "Hand-painted designs, chrome, or foil accents".to_string(),
            features: vec![
                "Per-nail or full-set designs".to_string(),
                "Seasonal collections".to_string(),
            ],
        },
    ]
});

/// All services offered by the salon, in display order
pub fn all_services() -> &'static [Service] {
    &SERVICES
}

/// Look up a service by its exact name
pub fn find_service(name: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.name == name)
}
