use serde::Serialize;
use std::fmt;

/// Third-party sites that take appointment bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingPlatform {
    Marham,
    Healthwire,
    Oladoc,
    FindMyDoctor,
    Doctify,
}

impl BookingPlatform {
    pub const ALL: [BookingPlatform; 5] = [
        Self::Marham,
        Self::Healthwire,
        Self::Oladoc,
        Self::FindMyDoctor,
        Self::Doctify,
    ];

    pub fn domain(self) -> &'static str {
        match self {
            Self::Marham => "marham.pk",
            Self::Healthwire => "healthwire.pk",
            Self::Oladoc => "oladoc.com",
            Self::FindMyDoctor => "findmydoctor.pk",
            Self::Doctify => "doctify.com",
        }
    }
}

impl fmt::Display for BookingPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AppointmentKind {
    #[serde(rename = "Online Booking")]
    OnlineBooking,
    #[serde(rename = "Physical Clinic")]
    PhysicalClinic,
}

/// Structured doctor or clinic record for `/find-appointments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub doctor_name: String,
    pub specialty: String,
    pub location: String,
    pub address: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_platform: Option<BookingPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Lighter `/find-doctors` result, either from a map place or a web hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DoctorListing {
    Place {
        title: String,
        address: Option<String>,
        rating: Option<f64>,
        #[serde(rename = "ratingCount")]
        rating_count: Option<u64>,
        phone: Option<String>,
    },
    Web {
        title: String,
        link: String,
        snippet: String,
        position: Option<u32>,
    },
}
