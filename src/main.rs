//! Rover firmware entry point
//!
//! Initializes the RP2040 and spawns the control task.

#![no_std]
#![no_main]

use crate::task::control::control;
use embassy_executor::Spawner;
use embassy_rp::config::Config;
use task::resources::{
    AssignedResources, DistanceSensorResources, DriveResources, OperatorResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the pins into the groups the control task owns
    let r = split_resources!(p);

    spawner
        .spawn(control(r.drive, r.distance_sensor, r.operator))
        .unwrap();
}
