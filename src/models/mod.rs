// Models module - Database entity representations

pub mod clinic;
pub mod medical_scale;
pub mod profile;
pub mod registration_token;

pub use clinic::Clinic;
pub use medical_scale::MedicalScale;
pub use profile::DoctorProfile;
pub use registration_token::{RegistrationToken, TokenStatus};
