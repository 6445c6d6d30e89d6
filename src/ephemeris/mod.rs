//! Binary planetary-ephemeris files and Chebyshev state-vector evaluation.
//!
//! [`EphemerisFile::open`] parses and validates the file header, after which
//! [`EphemerisFile::compute`] turns a [`Body`], a Julian Ephemeris Date and an
//! [`Origin`] into a [`StateVector`]: the record store loads the coefficient
//! record covering the epoch, the record evaluates the body's Chebyshev
//! series and its analytic derivative, and the handle applies the Earth/Moon
//! barycenter split and the optional reference-body subtraction.

pub mod bodies;
pub mod file;
pub mod header;
pub mod record;
pub mod state_vector;
pub mod store;

pub use bodies::{Body, Origin};
pub use file::EphemerisFile;
pub use header::EphemHeader;
pub use record::CoefficientRecord;
pub use state_vector::StateVector;
pub use store::RecordStore;
