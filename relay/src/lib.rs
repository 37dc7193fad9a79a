//! # Hop 'n' Hiss joystick relay
//!
//! Samples arrow-key deflections and fires each direction *change* at the
//! display process as a single UDP datagram. The protocol is one-directional:
//! the relay never receives anything and never retries, so a lost datagram
//! simply means the snake keeps its heading.

pub mod input;
