use std::thread;
use std::time::Duration;

use log::{debug, trace};

mod constants;
pub use constants::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod decode;
pub use decode::*;

mod transport;
pub use transport::*;

/// Returns the sequence number that follows `seq`, wrapping from 255 to 0.
pub fn next_sequence(seq: u8) -> u8 {
    seq.wrapping_add(1)
}

/// A session with one Finch robot.
///
/// The session owns the HID handle and the request sequence counter. Every
/// call blocks until the transport is done with it; sensor reads block until
/// the device answers the request that was just sent.
///
/// # Type Parameters
///
/// * `T`: The HID transport used to talk to the robot. Enable the `hidapi`
///   feature for an implementation over `hidapi::HidDevice` and
///   `Finch::open()`.
pub struct Finch<T> {
    transport: Option<T>,
    sequence: u8,
    config: Config,
}

impl<T> Finch<T>
where
    T: HidTransport,
{
    /// Creates a new `Finch` session over an already opened transport.
    ///
    /// # Arguments
    ///
    /// * `transport` - The HID transport connected to the robot.
    /// * `config` - Timeout and retry settings for the session.
    ///
    /// # Returns
    ///
    /// A new open `Finch` session whose sequence counter starts at 0.
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            transport: Some(transport),
            sequence: 0,
            config,
        }
    }

    /// The sequence number of the most recent sensor request.
    pub fn sequence_number(&self) -> u8 {
        self.sequence
    }

    /// Returns the configuration the session was created with.
    ///
    /// # Returns
    ///
    /// A reference to the session's `Config`.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `false` once `close` has run.
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Sets the beak LED color.
    pub fn set_led(&mut self, red: u8, green: u8, blue: u8) -> Result<usize> {
        debug!("Setting LED to ({}, {}, {})", red, green, blue);
        let mut command = base_command(LED_CMD);
        command[2] = red;
        command[3] = green;
        command[4] = blue;
        self.write(&command)
    }

    /// Drives both wheels.
    ///
    /// # Arguments
    ///
    /// * `left_direction` - [`FORWARD`] (0) or [`REVERSE`] (1).
    /// * `left_speed` - Left wheel speed, 0-255.
    /// * `right_direction` - [`FORWARD`] (0) or [`REVERSE`] (1).
    /// * `right_speed` - Right wheel speed, 0-255.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` with the number of bytes the device accepted.
    /// * `Err(Error::InvalidArgument)` naming the wheel if a direction is not
    ///   0 or 1. Nothing is sent in that case.
    /// * `Err(Error)` if the write failed.
    pub fn set_motor(
        &mut self,
        left_direction: u8,
        left_speed: u8,
        right_direction: u8,
        right_speed: u8,
    ) -> Result<usize> {
        check_direction(Wheel::Left, left_direction)?;
        check_direction(Wheel::Right, right_direction)?;

        debug!(
            "Setting motors: left {}/{}, right {}/{}",
            left_direction, left_speed, right_direction, right_speed
        );
        let mut command = base_command(MOTOR_CMD);
        command[2] = left_direction;
        command[3] = left_speed;
        command[4] = right_direction;
        command[5] = right_speed;
        self.write(&command)
    }

    /// Stops both motors and switches the LED off.
    pub fn turn_off_motor_and_leds(&mut self) -> Result<usize> {
        self.write(&base_command(STOP_CMD))
    }

    /// Stops the motors and returns the Finch to its color-cycling idle mode.
    pub fn set_idle_mode(&mut self) -> Result<usize> {
        self.write(&base_command(IDLE_CMD))
    }

    /// Sounds the buzzer for `duration_ms` at `frequency_hz`.
    ///
    /// # Arguments
    ///
    /// * `duration_ms` - How long the buzzer sounds, in milliseconds.
    /// * `frequency_hz` - The tone, in hertz.
    /// * `wait` - Sleep the calling thread for `duration_ms` after issuing the
    ///   write, so consecutive notes don't overlap. The sleep happens even if
    ///   the write failed.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` with the number of bytes the device accepted.
    /// * `Err(Error)` from the write, returned after any requested wait.
    pub fn set_buzzer(&mut self, duration_ms: u16, frequency_hz: u16, wait: bool) -> Result<usize> {
        debug!("Buzzing {} Hz for {} ms", frequency_hz, duration_ms);
        let mut command = base_command(BUZZER_CMD);
        command[2..4].copy_from_slice(&duration_ms.to_be_bytes());
        command[4..6].copy_from_slice(&frequency_hz.to_be_bytes());
        let written = self.write(&command);

        if wait {
            thread::sleep(Duration::from_millis(u64::from(duration_ms)));
        }
        written
    }

    /// Reads the temperature sensor.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` with the temperature in degrees Celsius.
    /// * `Err(Error)` if the write or read failed, or the session is closed.
    pub fn get_temperature(&mut self) -> Result<f64> {
        let frame = self.query(TEMPERATURE_CMD)?;
        let celsius = decode_temperature(&frame);
        debug!("Temperature: {:.1} C", celsius);
        Ok(celsius)
    }

    /// Reads both light sensors.
    pub fn get_light(&mut self) -> Result<Light> {
        let frame = self.query(LIGHT_CMD)?;
        Ok(decode_light(&frame))
    }

    /// Reads the accelerometer and the tap flag.
    pub fn get_acceleration(&mut self) -> Result<Acceleration> {
        let frame = self.query(ACCELERATION_CMD)?;
        Ok(decode_acceleration(&frame))
    }

    /// Reads both obstacle sensors.
    pub fn get_obstacles(&mut self) -> Result<Obstacles> {
        let frame = self.query(OBSTACLES_CMD)?;
        Ok(decode_obstacles(&frame))
    }

    /// Puts the Finch back in idle mode and releases the HID handle.
    ///
    /// A failure to send the idle command is logged and ignored; the handle
    /// is released either way. Closing an already closed session returns
    /// `Error::InvalidState`.
    pub fn close(&mut self) -> Result<()> {
        if self.transport.is_none() {
            return Err(Error::InvalidState);
        }

        if let Err(e) = self.set_idle_mode() {
            log::warn!("Failed to put Finch in idle mode while closing: {}", e);
        }

        drop(self.transport.take());
        debug!("Finch session closed");
        Ok(())
    }

    /// Gives the transport back without sending anything. Returns `None` if
    /// the session was already closed.
    pub fn into_transport(self) -> Option<T> {
        self.transport
    }

    // Sends a sensor request tagged with a fresh sequence number and returns
    // the response frame that echoes it.
    fn query(&mut self, tag: u8) -> Result<[u8; FRAME_LEN]> {
        if self.transport.is_none() {
            return Err(Error::InvalidState);
        }

        self.sequence = next_sequence(self.sequence);
        let mut frame = base_command(tag);
        frame[SEQ_IDX] = self.sequence;

        self.write(&frame)?;
        self.read_response(&mut frame)?;
        Ok(frame)
    }

    // Writes a frame, repeating the write for as long as the device accepts
    // zero bytes.
    fn write(&mut self, command: &[u8; FRAME_LEN]) -> Result<usize> {
        let max_attempts = self.config.max_write_attempts;
        let transport = self.transport.as_mut().ok_or(Error::InvalidState)?;

        debug!("Executing command: {:02X?}", command);
        let mut attempts = 0;
        loop {
            if max_attempts.is_some_and(|max| attempts >= max) {
                debug!("Write of {:02X?} stalled after {} attempts", command, attempts);
                return Err(Error::RetriesExhausted {
                    op: RetryOp::Write,
                    attempts,
                });
            }
            attempts += 1;

            let written = transport.write(command)?;
            if written > 0 {
                return Ok(written);
            }
            trace!("Device accepted 0 bytes (attempt {}), retrying", attempts);
        }
    }

    // Reads into `frame` until the echoed sequence byte matches the one sent.
    // Older responses still queued on the device are skipped.
    fn read_response(&mut self, frame: &mut [u8; FRAME_LEN]) -> Result<()> {
        let timeout_ms = self.config.read_timeout_ms;
        let max_attempts = self.config.max_read_attempts;
        let transport = self.transport.as_mut().ok_or(Error::InvalidState)?;

        let mut attempts = 0;
        loop {
            if max_attempts.is_some_and(|max| attempts >= max) {
                debug!(
                    "No response for sequence {} after {} reads",
                    frame[SEQ_IDX],
                    attempts
                );
                return Err(Error::RetriesExhausted {
                    op: RetryOp::Read,
                    attempts,
                });
            }
            attempts += 1;

            let read = transport.read_timeout(frame, timeout_ms)?;
            if frame[ECHO_SEQ_IDX] == frame[SEQ_IDX] {
                debug!("Response: {:02X?}", frame);
                return Ok(());
            }
            trace!(
                "Read {} bytes with sequence {} while waiting for {}, retrying",
                read,
                frame[ECHO_SEQ_IDX],
                frame[SEQ_IDX]
            );
        }
    }
}

// Constructs a zeroed frame carrying the command tag.
fn base_command(tag: u8) -> [u8; FRAME_LEN] {
    let mut command = [0u8; FRAME_LEN];
    command[TAG_IDX] = tag;
    command
}

fn check_direction(wheel: Wheel, value: u8) -> Result<()> {
    if value == FORWARD || value == REVERSE {
        Ok(())
    } else {
        debug!("Invalid {} wheel direction {}", wheel, value);
        Err(Error::InvalidArgument { wheel, value })
    }
}
