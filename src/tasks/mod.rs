//! Background Tasks Module
//!
//! Houses the TTL sweep task that enforces expiry independent of traffic.

pub(crate) mod sweep;
