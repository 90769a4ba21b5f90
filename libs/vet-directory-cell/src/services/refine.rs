use std::cmp::Ordering;

use crate::models::VeterinarianProfile;

/// Client-side refinement of an already-fetched page: two predicate filters
/// (rating floor, fee ceiling) followed by a deterministic sort. Pure and
/// idempotent - refining the output again yields the same set and order. It
/// never fetches more data, so matches on other pages stay invisible by
/// design.
pub fn refine(
    page: Vec<VeterinarianProfile>,
    min_rating: f32,
    max_fee: f64,
) -> Vec<VeterinarianProfile> {
    let mut refined: Vec<VeterinarianProfile> = page
        .into_iter()
        .filter(|vet| vet.average_rating >= min_rating)
        .filter(|vet| vet.min_defined_fee() <= max_fee)
        .collect();

    refined.sort_by(compare_for_display);
    refined
}

/// Primary key: ascending distance where both sides know theirs. Profiles
/// without a distance sort after those with one. Fallback and tie-break:
/// descending rating.
fn compare_for_display(a: &VeterinarianProfile, b: &VeterinarianProfile) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(da), Some(db)) => da
            .partial_cmp(&db)
            .unwrap_or(Ordering::Equal)
            .then(rating_desc(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => rating_desc(a, b),
    }
}

fn rating_desc(a: &VeterinarianProfile, b: &VeterinarianProfile) -> Ordering {
    b.average_rating
        .partial_cmp(&a.average_rating)
        .unwrap_or(Ordering::Equal)
}
