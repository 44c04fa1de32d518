//! Fixture builders for creating on-disk test projects

mod fixture;

pub use fixture::ProjectFixture;
