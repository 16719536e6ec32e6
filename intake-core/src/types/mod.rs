//! Domain types for the intake pipeline

pub mod case;
pub mod intake;
pub mod normalized;
pub mod reference;
