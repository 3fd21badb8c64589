//! Control Task
//!
//! Owns every rover pin and runs the control loop forever, one tick every
//! 100 ms. Each tick's report is turned into RTT log lines.
//!
//! # Timing
//! - the distance measurement busy-waits on the echo line and blocks the
//!   executor for up to ~70 ms; this is the only task, so nothing starves
//! - the full tick period is slept after every tick, no drift compensation

use defmt::{debug, error, info, warn};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Delay, Duration, Timer};
use obstacle_rover::system::config::{Config, STARTUP_DELAY_MS};
use obstacle_rover::system::control_loop::{ControlLoop, TickReport};
use obstacle_rover::system::distance::{Distance, DistanceSensor, EchoPhase};
use obstacle_rover::system::drivetrain::{Channel, Drivetrain};
use obstacle_rover::system::error::Result;
use obstacle_rover::system::motion::Decision;

use crate::task::clock::EmbassyClock;
use crate::task::resources::{DistanceSensorResources, DriveResources, OperatorResources};

type Rover = ControlLoop<
    DistanceSensor<Output<'static>, Input<'static>, Delay, EmbassyClock>,
    Drivetrain<Output<'static>, Output<'static>>,
    Input<'static>,
    EmbassyClock,
>;

/// Rover control task
#[embassy_executor::task]
pub async fn control(
    drive: DriveResources,
    sensor: DistanceSensorResources,
    operator: OperatorResources,
) {
    info!("Initializing system...");
    let config = Config::default();

    // Claimed so nothing else drives it; not read
    let _speed = Input::new(operator.speed_pin, Pull::None);
    let switch = Input::new(operator.switch_pin, Pull::None);

    let mut rover = match assemble(&config, drive, sensor, switch) {
        Ok(rover) => rover,
        Err(e) => {
            error!("rover setup failed: {}", e);
            return;
        }
    };

    // Give the sensor and the motor supply time to stabilize
    Timer::after(Duration::from_millis(STARTUP_DELAY_MS)).await;
    info!("System initialized. Starting main loop...");

    let tick_period = Duration::from_millis(rover.tick_period_ms());
    loop {
        match rover.tick() {
            Ok(report) => log_report(&report),
            Err(e) => error!("control tick failed: {}", e),
        }
        Timer::after(tick_period).await;
    }
}

/// Builds the drivetrain and the sensor from the assigned pins
fn assemble(
    config: &Config,
    drive: DriveResources,
    sensor: DistanceSensorResources,
    switch: Input<'static>,
) -> Result<Rover> {
    let left = Channel::new(
        Output::new(drive.left_forward_pin, Level::Low),
        Output::new(drive.left_backward_pin, Level::Low),
        Output::new(drive.left_enable_pin, Level::Low),
    )?;
    let right = Channel::new(
        Output::new(drive.right_forward_pin, Level::Low),
        Output::new(drive.right_backward_pin, Level::Low),
        Output::new(drive.right_enable_pin, Level::Low),
    )?;
    let drivetrain = Drivetrain::new(left, right, Output::new(drive.buzzer_pin, Level::Low))?;

    let distance_sensor = DistanceSensor::new(
        Output::new(sensor.trigger_pin, Level::Low),
        Input::new(sensor.echo_pin, Pull::None),
        Delay,
        EmbassyClock,
        config.sensor,
    );

    Ok(ControlLoop::new(
        config,
        distance_sensor,
        drivetrain,
        switch,
        EmbassyClock,
    ))
}

fn log_report(report: &TickReport) {
    if let Some(enabled) = report.toggled {
        info!(
            "System state changed to: {}",
            if enabled { "ENABLED" } else { "DISABLED" }
        );
    }

    if let Some(echo) = report.echo {
        match echo.distance {
            Distance::Measured(cm) => {
                info!("Duration: {} us, Distance: {} cm", echo.duration_us, cm)
            }
            Distance::NoEcho(EchoPhase::Rise) => warn!("Timeout waiting for echo start"),
            Distance::NoEcho(EchoPhase::Fall) => warn!("Timeout waiting for echo end"),
        }
    }

    match report.decision {
        Decision::EmergencyStop => warn!("Obstacle detected! Emergency stop - buzzer ON"),
        Decision::Resume => info!("Path clear, resuming movement - buzzer OFF"),
        Decision::Forward => debug!("Motors moving forward"),
        Decision::Stopped => debug!("Motors stopped"),
    }
}
