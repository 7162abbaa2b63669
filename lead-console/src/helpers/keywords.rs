//! Expansion of industry categories into discovery search terms.

/// Upper bound on search terms per discovery job.
pub const MAX_KEYWORDS: usize = 20;

const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("construction", &["home builder", "general contractor", "custom home builder", "residential construction", "design build"]),
    ("roofing", &["roofing contractor", "roof repair", "roof replacement", "roofer"]),
    ("hvac", &["hvac", "heating cooling", "air conditioning", "furnace repair", "ac repair"]),
    ("plumbing", &["plumber", "plumbing contractor", "drain cleaning", "water heater"]),
    ("electrical", &["electrician", "electrical contractor", "electrical services"]),
    ("landscaping", &["landscaping", "lawn care", "landscape design", "hardscaping", "lawn service"]),
    ("healthcare", &["doctor", "physician", "medical clinic", "family practice", "medical center"]),
    ("dental", &["dentist", "dental clinic", "orthodontist", "cosmetic dentistry"]),
    ("veterinary", &["veterinarian", "animal hospital", "pet clinic", "veterinary clinic"]),
    ("legal", &["lawyer", "attorney", "law firm", "legal services"]),
    ("accounting", &["accountant", "CPA", "bookkeeping", "tax services"]),
    ("realestate", &["real estate agent", "realtor", "property management", "real estate agency"]),
    ("restaurants", &["restaurant", "cafe", "bistro", "eatery", "diner"]),
    ("wellness", &["spa", "massage", "wellness center", "med spa"]),
    ("beauty", &["hair salon", "beauty salon", "barber", "nail salon"]),
    ("fitness", &["gym", "fitness center", "personal training", "yoga studio"]),
    ("automotive", &["auto repair", "car mechanic", "auto body", "oil change", "car repair"]),
    ("cleaning", &["house cleaning", "maid service", "commercial cleaning", "cleaning service"]),
    ("photography", &["photographer", "wedding photography", "portrait studio"]),
    ("retail", &["store", "shop", "boutique", "retail"]),
];

/// Known industry category names, in table order.
pub fn industries() -> impl Iterator<Item = &'static str> {
    INDUSTRY_KEYWORDS.iter().map(|(name, _)| *name)
}

pub fn keywords_for(industry: &str) -> Option<&'static [&'static str]> {
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(industry.trim()))
        .map(|(_, keywords)| *keywords)
}

/// Industry keywords first, then the comma-separated custom terms, with
/// duplicates removed keeping the first occurrence. Unknown industries
/// contribute nothing.
pub fn expand_keywords(industries: &[String], custom: &str) -> Vec<String> {
    let from_industries = industries
        .iter()
        .filter_map(|i| keywords_for(i))
        .flat_map(|kws| kws.iter().map(|k| k.to_string()));

    let from_custom = custom
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);

    let mut keywords: Vec<String> = Vec::new();
    for keyword in from_industries.chain(from_custom) {
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords
}
