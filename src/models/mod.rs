mod profile;
mod validity;

pub use profile::Profile;
pub use validity::Validity;
