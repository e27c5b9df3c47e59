//! Testing infrastructure (mock interface and clock).

pub(crate) mod mock;

pub(crate) use mock::{Access, MockInterface, MockTime};
