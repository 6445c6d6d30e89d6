pub mod angle;
pub mod astrokit_errors;
pub mod catalog;
pub mod constants;
pub mod ephemeris;
pub mod ref_system;
pub mod spherical;
pub mod time;
