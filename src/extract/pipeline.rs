use super::{
    records::{Appointment, AppointmentKind, DoctorListing},
    text::{
        NO_ADDRESS, NO_PHONE, clean_title, detect_platform, extract_address, extract_city,
        extract_phone, extract_specialty, is_valid_doctor_listing, is_valid_medical_facility,
    },
};
use crate::search::SearchResponse;
use tracing::debug;

const FACILITY_SPECIALTY: &str = "Medical Facility";

/// Titles that mark a directory hit as editorial content rather than a doctor page.
const SKIPPED_TITLE_WORDS: &[&str] = &["news", "article", "report", "pdf", "research"];

pub fn doctors_query(disease: &str, location: &str) -> String {
    format!("doctors treating {disease} in {location}")
}

/// Restricts the search to the known booking directories.
pub fn directory_query(disease: &str, location: &str) -> String {
    format!(
        "doctor appointment {disease} {location} \
         site:marham.pk OR site:healthwire.pk OR site:oladoc.com OR \
         site:findmydoctor.pk OR site:doctify.com"
    )
}

pub fn places_query(disease: &str, location: &str) -> String {
    format!("neurologist clinic hospital {disease} treatment {location}")
}

/// Places first (they carry addresses and ratings), then web results.
pub fn doctor_listings(results: &SearchResponse) -> Vec<DoctorListing> {
    let places = results.places.iter().map(|place| DoctorListing::Place {
        title: place.title.clone(),
        address: place.address.clone(),
        rating: place.rating,
        rating_count: place.rating_count,
        phone: place.phone_number.clone(),
    });

    let web = results.organic.iter().map(|hit| DoctorListing::Web {
        title: hit.title.clone(),
        link: hit.link.clone(),
        snippet: hit.snippet.clone(),
        position: hit.position,
    });

    places.chain(web).collect()
}

/// Online-booking records from directory search hits.
///
/// Keeps only hits on a known booking platform whose cleaned title passes
/// [`is_valid_doctor_listing`].
pub fn directory_appointments(results: &SearchResponse, location: &str) -> Vec<Appointment> {
    let city = extract_city(location);

    results
        .organic
        .iter()
        .filter_map(|hit| {
            let title_lower = hit.title.to_lowercase();
            if SKIPPED_TITLE_WORDS.iter().any(|w| title_lower.contains(w)) {
                debug!("Skipping editorial result: {}", hit.title);
                return None;
            }

            let platform = detect_platform(&hit.link)?;
            let doctor_name = clean_title(&hit.title);
            if !is_valid_doctor_listing(&doctor_name, &hit.snippet) {
                debug!("Rejected listing: {}", doctor_name);
                return None;
            }

            Some(Appointment {
                doctor_name,
                specialty: extract_specialty(&hit.snippet),
                location: city.clone(),
                address: extract_address(&hit.snippet),
                phone: extract_phone(&hit.snippet),
                kind: AppointmentKind::OnlineBooking,
                date: "Book online".to_string(),
                time: "Check availability online".to_string(),
                booking_platform: Some(platform),
                booking_link: Some(hit.link.clone()),
                snippet: Some(hit.snippet.clone()),
                rating: None,
                rating_count: None,
                website: None,
            })
        })
        .collect()
}

/// Physical-clinic records from map places that look like medical facilities.
pub fn clinic_appointments(results: &SearchResponse, location: &str) -> Vec<Appointment> {
    let city = extract_city(location);

    results
        .places
        .iter()
        .filter(|place| is_valid_medical_facility(&place.title))
        .map(|place| Appointment {
            doctor_name: clean_title(&place.title),
            specialty: FACILITY_SPECIALTY.to_string(),
            location: city.clone(),
            address: place
                .address
                .clone()
                .unwrap_or_else(|| NO_ADDRESS.to_string()),
            phone: place
                .phone_number
                .clone()
                .unwrap_or_else(|| NO_PHONE.to_string()),
            kind: AppointmentKind::PhysicalClinic,
            date: "Contact clinic".to_string(),
            time: "Contact for times".to_string(),
            booking_platform: None,
            booking_link: None,
            snippet: None,
            rating: place.rating,
            rating_count: place.rating_count,
            website: Some(place.website.clone().unwrap_or_default()),
        })
        .collect()
}
