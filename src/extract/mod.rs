//! Turns raw search results into doctor and clinic records.

mod pipeline;
mod records;
pub mod text;

pub use pipeline::{
    clinic_appointments, directory_appointments, directory_query, doctor_listings, doctors_query,
    places_query,
};
pub use records::{Appointment, AppointmentKind, BookingPlatform, DoctorListing};
pub use text::{
    clean_title, detect_platform, extract_address, extract_city, extract_phone,
    extract_specialty, is_valid_doctor_listing, is_valid_medical_facility,
};
