//! Device dump decoding.
//!
//! [`registry`] maps file names to schemas, [`decoder`] turns one file into
//! a [`record::Record`] (the typed message plus its raw payload, with
//! [`wire`] listing any fields the typed message does not declare), [`sports`] builds the sport index from
//! `SYS/SPORT`, and [`traverse`] walks `U/` applying the decoder and the
//! per-category rules in [`category`].
//!
//! Start with [`layout::DumpRoot::open`] to validate a dump directory.

pub mod category;
pub mod decoder;
pub mod layout;
pub mod record;
pub mod registry;
pub mod sports;
pub mod traverse;
pub mod wire;
