use gourmet_core::domain::restaurant::{RestaurantRecord, SearchResultSet};
use gourmet_core::places::MIN_RATING;

const PHOTO_PROXY_PATH: &str = "/api/photo";

pub fn render_results(result: &SearchResultSet, radius_miles: f64) -> String {
    let plural = if radius_miles > 1.0 { "s" } else { "" };
    let mut out = format!(
        "Highly-rated restaurants ({MIN_RATING}+) within {radius_miles} mile{plural}\n\n"
    );

    if result.is_fallback_data {
        out.push_str("Demo Mode: Showing mock data because no API key was provided.\n\n");
    }

    if result.records.is_empty() {
        out.push_str(&format!(
            "No restaurants found nearby with a {MIN_RATING}+ rating. Tough crowd!\n"
        ));
        return out;
    }

    for record in &result.records {
        out.push_str(&render_card(record));
        out.push('\n');
    }
    out
}

pub fn render_card(record: &RestaurantRecord) -> String {
    let count = record
        .rating_count
        .map(|c| format!(" ({c})"))
        .unwrap_or_default();
    let mut out = format!("{}  * {}{}\n", record.name, record.rating, count);
    out.push_str(&format!("    {}\n", record.address));

    if let Some(open) = record.is_open_now {
        out.push_str(if open { "    Open Now\n" } else { "    Closed\n" });
    }

    match record.photo_refs.first() {
        Some(photo) => out.push_str(&format!("    Photo: {PHOTO_PROXY_PATH}?name={}\n", photo.name)),
        None => out.push_str("    No Image Available\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gourmet_core::domain::restaurant::PhotoRef;
    use gourmet_core::geo::Location;
    use gourmet_core::places::fallback::fallback_records;

    #[test]
    fn card_shows_first_photo_through_proxy() {
        let record = RestaurantRecord {
            id: "p1".to_string(),
            name: "Great Grill".to_string(),
            rating: 4.9,
            rating_count: Some(300),
            address: "2 B St".to_string(),
            location: Location::new(1.0, 2.0),
            is_open_now: Some(false),
            photo_refs: vec![
                PhotoRef {
                    name: "places/p1/photos/a".to_string(),
                    height_px: None,
                    width_px: None,
                },
                PhotoRef {
                    name: "places/p1/photos/b".to_string(),
                    height_px: None,
                    width_px: None,
                },
            ],
        };

        let card = render_card(&record);
        assert!(card.starts_with("Great Grill  * 4.9 (300)\n"));
        assert!(card.contains("Closed"));
        assert!(card.contains("Photo: /api/photo?name=places/p1/photos/a"));
        assert!(!card.contains("photos/b"));
    }

    #[test]
    fn fallback_card_layout() {
        let card = render_card(&fallback_records()[1]);
        assert_eq!(
            card,
            "Sushi Master  * 4.6 (89)\n    456 Oak Ave, Anytown\n    Closed\n    No Image Available\n"
        );
    }

    #[test]
    fn demo_banner_for_fallback() {
        let set = SearchResultSet {
            records: fallback_records(),
            is_fallback_data: true,
        };
        let out = render_results(&set, 2.0);
        assert!(out.contains("within 2 miles"));
        assert!(out.contains("Demo Mode"));
        assert_eq!(out.matches("No Image Available").count(), 3);
    }

    #[test]
    fn empty_results_message() {
        let set = SearchResultSet {
            records: Vec::new(),
            is_fallback_data: false,
        };
        let out = render_results(&set, 1.0);
        assert!(out.contains("within 1 mile\n"));
        assert!(out.contains("Tough crowd!"));
        assert!(!out.contains("Demo Mode"));
    }
}
