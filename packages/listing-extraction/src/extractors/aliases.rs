//! Field alias sets.
//!
//! Providers never agree on key names. Order within a set is the tie-break
//! when several aliases sit on the same object.

pub const ADDRESS: &[&str] = &[
    "address",
    "streetAddress",
    "fullAddress",
    "formattedAddress",
    "addressLine",
];

pub const PRICE: &[&str] = &["price", "listPrice", "listingPrice", "unformattedPrice", "amount"];

pub const BEDROOMS: &[&str] = &["numberOfBedrooms", "bedrooms", "beds", "bedroomCount"];

pub const BATHROOMS: &[&str] = &[
    "numberOfBathroomsTotal",
    "bathrooms",
    "baths",
    "bathroomCount",
    "numberOfFullBathrooms",
];

pub const FLOOR_SIZE: &[&str] = &[
    "floorSize",
    "livingArea",
    "squareFeet",
    "sqft",
    "livingAreaValue",
    "area",
];

pub const DESCRIPTION: &[&str] = &["description", "summary", "remarks", "publicRemarks"];

pub const IMAGES: &[&str] = &["image", "images", "photos", "photo", "responsivePhotos"];

pub const FEATURES: &[&str] = &["amenityFeature", "features", "amenities", "atAGlanceFacts"];

/// Resolved when present but never scored.
pub const NEIGHBORHOOD: &[&str] = &[
    "neighborhood",
    "neighbourhood",
    "neighborhoodName",
    "subdivisionName",
];

/// Alias sets that count toward a candidate's score, with their weights.
pub const SCORED: &[(&[&str], u32)] = &[
    (ADDRESS, 2),
    (PRICE, 2),
    (BEDROOMS, 2),
    (BATHROOMS, 2),
    (FLOOR_SIZE, 2),
    (DESCRIPTION, 1),
    (IMAGES, 1),
    (FEATURES, 1),
];

/// Highest score a candidate can reach.
pub fn max_score() -> u32 {
    SCORED.iter().map(|(_, weight)| weight).sum()
}
