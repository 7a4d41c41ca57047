//! The authentication core: token codec, cookie session manager and the
//! request gatekeeper.
//!
//! Everything here is stateless — a verification is a pure function of
//! (token, secret, current time), so the whole module is safely callable
//! from any number of concurrent connection tasks without locks.

pub mod gate;
pub mod jwt;
pub mod session;
