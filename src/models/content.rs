use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::validation::{is_blank, is_valid_email, is_valid_url, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralContent {
    pub business_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about_teaser_title: String,
    pub about_teaser_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: f64,
    // Minutes.
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContent {
    pub general: GeneralContent,
    pub home: HomeContent,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<HomeContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            general: GeneralContent {
                business_name: "Nailsure".to_string(),
                phone: String::new(),
                email: String::new(),
                address: String::new(),
                instagram: None,
                facebook: None,
            },
            home: HomeContent {
                hero_title: "Welcome".to_string(),
                hero_subtitle: String::new(),
                about_teaser_title: String::new(),
                about_teaser_text: String::new(),
            },
            services: default_services(),
        }
    }
}

fn default_services() -> Vec<Service> {
    let catalogue = [
        (
            "classic-manicure",
            "Classic Manicure",
            45.0,
            45,
            "A timeless treatment including nail shaping, cuticle care, and polish application.",
        ),
        (
            "luxury-spa",
            "Luxury Spa Manicure",
            75.0,
            60,
            "An indulgent experience with exfoliation, massage, and paraffin treatment.",
        ),
        (
            "gel-extension",
            "Gel Extensions",
            120.0,
            90,
            "Beautiful, durable gel extensions customized to your desired length and shape.",
        ),
        (
            "nail-art",
            "Signature Nail Art",
            150.0,
            120,
            "Bespoke nail artistry featuring hand-painted designs and premium embellishments.",
        ),
    ];

    catalogue
        .into_iter()
        .map(|(id, name, price, duration, description)| Service {
            id: id.to_string(),
            name: name.to_string(),
            price,
            duration,
            description: description.to_string(),
        })
        .collect()
}

impl SiteContent {
    pub fn apply(&mut self, patch: ContentPatch) {
        if let Some(general) = patch.general {
            self.general = general;
        }
        if let Some(home) = patch.home {
            self.home = home;
        }
        if let Some(services) = patch.services {
            self.services = services;
        }
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}

impl GeneralContent {
    fn check(&self, errors: &mut FieldErrors) {
        if is_blank(&self.business_name) {
            errors.push("general.businessName", "Business name is required");
        }
        if is_blank(&self.phone) {
            errors.push("general.phone", "Phone number is required");
        }
        if !is_valid_email(&self.email) {
            errors.push("general.email", "Invalid email address");
        }
        if is_blank(&self.address) {
            errors.push("general.address", "Address is required");
        }
        for (field, value) in [
            ("general.instagram", &self.instagram),
            ("general.facebook", &self.facebook),
        ] {
            if let Some(link) = value.as_deref().filter(|v| !is_blank(v)) {
                if !is_valid_url(link) {
                    errors.push(field, "Invalid URL");
                }
            }
        }
    }
}

impl HomeContent {
    fn check(&self, errors: &mut FieldErrors) {
        let fields = [
            ("home.heroTitle", &self.hero_title, "Hero title is required"),
            ("home.heroSubtitle", &self.hero_subtitle, "Hero subtitle is required"),
            (
                "home.aboutTeaserTitle",
                &self.about_teaser_title,
                "About teaser title is required",
            ),
            (
                "home.aboutTeaserText",
                &self.about_teaser_text,
                "About teaser text is required",
            ),
        ];
        for (field, value, message) in fields {
            if is_blank(value) {
                errors.push(field, message);
            }
        }
    }
}

fn check_services(services: &[Service], errors: &mut FieldErrors) {
    let mut seen = HashSet::new();
    for (i, service) in services.iter().enumerate() {
        if is_blank(&service.id) {
            errors.push(format!("services[{i}].id"), "Service id is required");
        } else if !seen.insert(service.id.as_str()) {
            errors.push(format!("services[{i}].id"), "Service id must be unique");
        }
        if is_blank(&service.name) {
            errors.push(format!("services[{i}].name"), "Service name is required");
        }
        if !service.price.is_finite() || service.price < 0.0 {
            errors.push(format!("services[{i}].price"), "Price must be positive");
        }
        if service.duration < 1 {
            errors.push(format!("services[{i}].duration"), "Duration must be positive");
        }
    }
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.home.is_none() && self.services.is_none()
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(general) = &self.general {
            general.check(&mut errors);
        }
        if let Some(home) = &self.home {
            home.check(&mut errors);
        }
        if let Some(services) = &self.services {
            check_services(services, &mut errors);
        }
        errors.into_result()
    }
}
