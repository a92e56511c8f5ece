//! A music organizer: an indexed collection of tracks scanned from a folder,
//! played by index, at random, or as a shuffle that plays every track once.

pub mod audio;
pub mod config;
pub mod library;
pub mod organizer;
pub mod runtime;
