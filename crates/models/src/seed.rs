//! Built-in catalog used when nothing has been persisted yet. Mirrors the
//! sample data the dashboard ships with, so a fresh install renders a
//! populated screen instead of an empty table.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::service::{
    PricingModel, Service, ServiceCategory, ServiceStatus, Visibility,
};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).expect("valid seed timestamp").with_timezone(&Utc)
}

static SEED: Lazy<Vec<Service>> = Lazy::new(|| {
    vec![
        Service {
            id: "1".into(),
            name: "Enterprise Cloud Migration".into(),
            description: "Help enterprises migrate their infrastructure to cloud platforms securely and efficiently.".into(),
            detailed_description: "Our enterprise cloud migration service helps organizations transition their infrastructure, applications, and data to cloud platforms. We provide end-to-end support including assessment, planning, migration, and post-migration optimization.".into(),
            category: ServiceCategory::Consulting,
            tags: vec!["Cloud".into(), "Enterprise".into(), "Security".into()],
            status: ServiceStatus::Published,
            pricing_model: PricingModel::Fixed,
            price: "15000".into(),
            duration: "3-6 months".into(),
            is_active: true,
            rating: 4.8,
            popularity: 87,
            created_at: ts("2023-06-12T10:30:00Z"),
            updated_at: ts("2023-07-15T14:45:00Z"),
            contact_email: "cloud@example.com".into(),
            visibility: Visibility::Public,
            banner_image_url: "https://source.unsplash.com/random/1200x600/?cloud".into(),
        },
        Service {
            id: "2".into(),
            name: "Data Analytics Workshop".into(),
            description: "Hands-on workshop for teams to learn advanced data analytics techniques and tools.".into(),
            detailed_description: "This intensive workshop covers modern data analytics techniques, tools, and best practices. Participants will learn through hands-on exercises and real-world case studies.".into(),
            category: ServiceCategory::Training,
            tags: vec!["Data Analytics".into(), "Training".into(), "Remote".into()],
            status: ServiceStatus::Published,
            pricing_model: PricingModel::Fixed,
            price: "2500".into(),
            duration: "2 days".into(),
            is_active: true,
            rating: 4.5,
            popularity: 64,
            created_at: ts("2023-05-20T09:15:00Z"),
            updated_at: ts("2023-06-18T11:20:00Z"),
            contact_email: "training@example.com".into(),
            visibility: Visibility::Public,
            banner_image_url: "https://source.unsplash.com/random/1200x600/?data".into(),
        },
        Service {
            id: "3".into(),
            name: "Custom API Development".into(),
            description: "Development of custom APIs to connect existing systems and enable data exchange.".into(),
            detailed_description: "We design and develop custom APIs that connect your existing systems, enabling seamless data exchange and integration with third-party platforms.".into(),
            category: ServiceCategory::CustomDevelopment,
            tags: vec!["API".into(), "Development".into(), "Integration".into()],
            status: ServiceStatus::Draft,
            pricing_model: PricingModel::Hourly,
            price: "150".into(),
            duration: "Varies by project".into(),
            is_active: true,
            rating: 0.0,
            popularity: 0,
            created_at: ts("2023-08-05T15:45:00Z"),
            updated_at: ts("2023-08-05T15:45:00Z"),
            contact_email: "dev@example.com".into(),
            visibility: Visibility::Private,
            banner_image_url: "https://source.unsplash.com/random/1200x600/?api".into(),
        },
    ]
});

/// Fresh copy of the seed catalog.
pub fn seed_services() -> Vec<Service> {
    SEED.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let seed = seed_services();
        let mut ids: Vec<_> = seed.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), seed.len());
    }

    #[test]
    fn seed_respects_record_invariants() {
        for svc in seed_services() {
            assert!(svc.created_at <= svc.updated_at, "{} timestamps inverted", svc.id);
            assert!((0.0..=5.0).contains(&svc.rating));
            crate::service::validate_price(&svc.price, svc.pricing_model)
                .expect("seed price parses");
            assert!(crate::service::is_valid_contact_email(&svc.contact_email));
        }
    }
}
