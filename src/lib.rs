//! Obstacle rover control logic
//!
//! Board-agnostic part of the rover firmware. Everything in here talks to the
//! hardware through `embedded-hal` traits and the [`system::timing::Clock`]
//! trait, so it runs unchanged on the RP2040 and on the host under test.
//!
//! The firmware binary (`src/main.rs`, feature `rp`) wires these pieces to
//! real pins and runs [`system::control_loop::ControlLoop`] every 100 ms.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod system;
