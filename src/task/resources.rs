//! Hardware Resource Management
//!
//! Assigns the RP2040 pins to the groups the control task takes ownership of.
//! The numbers match the rover's wiring harness.
//!
//! # Resource Groups
//! - Drive: two H-bridge channels (direction pair + enable each) and the buzzer
//! - Distance sensor: trigger/echo pair
//! - Operator input: IR beam toggle switch and the speed potentiometer line
//!
//! The potentiometer line is claimed and configured as an input so nothing
//! else can drive it, but its value is not used for any decision.

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// H-bridge channels and buzzer
    drive: DriveResources {
        left_forward_pin: PIN_4,
        left_backward_pin: PIN_5,
        left_enable_pin: PIN_17,
        right_forward_pin: PIN_21,
        right_backward_pin: PIN_7,
        right_enable_pin: PIN_18,
        buzzer_pin: PIN_26,
    },
    /// Ultrasonic distance sensor pins
    distance_sensor: DistanceSensorResources {
        trigger_pin: PIN_28,
        echo_pin: PIN_27,
    },
    /// IR beam toggle switch and reserved speed input
    operator: OperatorResources {
        switch_pin: PIN_6,
        speed_pin: PIN_20,
    },
}
