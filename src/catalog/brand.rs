use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Logo asset registered for a known service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceBrand {
    pub service: &'static str,
    pub logo: &'static str,
}

static BRANDS: Lazy<HashMap<&'static str, ServiceBrand>> = Lazy::new(|| {
    [
        ("Netflix", "logos/netflix.png"),
        ("Spotify", "logos/spotify.png"),
        ("Disney+", "logos/disney.webp"),
        ("Amazon Prime", "logos/amazon-prime.webp"),
        ("Apple One", "logos/apple-one.svg"),
        ("Hulu", "logos/hulu.png"),
        ("Microsoft 365", "logos/microsoft-365.png"),
        ("Adobe Creative Suite", "logos/adobe.jpeg"),
    ]
    .into_iter()
    .map(|(service, logo)| (service, ServiceBrand { service, logo }))
    .collect()
});

/// Exact-name lookup; unknown services fall back to initials in the UI.
pub fn brand_for(service: &str) -> Option<ServiceBrand> {
    BRANDS.get(service).copied()
}

/// Two-letter avatar text: first two letters of a single word, otherwise the
/// first letter of each of the first two words.
pub fn service_initials(service: &str) -> String {
    let words: Vec<&str> = service.split_whitespace().collect();
    match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect::<String>().to_uppercase(),
        many => many
            .iter()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase(),
    }
}
