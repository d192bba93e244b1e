//! Two-state controller for the single digital output.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use tracing::{debug, info, warn};

use crate::command::Command;

/// Logical state of the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorState {
    On,
    Off,
}

/// Owns the output pin and the current state.
///
/// The state changes only when a `TurnOn` / `TurnOff` command is applied and
/// the pin write succeeds; `NoCommand` touches neither. Callers that share an
/// actuator across requests must serialize `apply` (the handler holds it
/// behind a `tokio::sync::Mutex`).
pub struct Actuator<P: OutputPin> {
    pin: P,
    state: ActuatorState,
}

impl<P: OutputPin> Actuator<P> {
    /// Takes ownership of the pin and drives it LOW (state `Off`).
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_low() {
            warn!("Failed to drive actuator pin low at startup: {:?}", e);
        }
        Self {
            pin,
            state: ActuatorState::Off,
        }
    }

    pub fn state(&self) -> ActuatorState {
        self.state
    }

    /// Applies a command and returns the resulting state.
    pub fn apply(&mut self, command: Command) -> ActuatorState {
        match command {
            Command::TurnOn => match self.pin.set_high() {
                Ok(()) => {
                    self.state = ActuatorState::On;
                    info!("Actuator turned ON");
                }
                Err(e) => warn!("Pin write failed, state unchanged: {:?}", e),
            },
            Command::TurnOff => match self.pin.set_low() {
                Ok(()) => {
                    self.state = ActuatorState::Off;
                    info!("Actuator turned OFF");
                }
                Err(e) => warn!("Pin write failed, state unchanged: {:?}", e),
            },
            Command::NoCommand => info!("No valid command received, actuator unchanged"),
        }
        self.state
    }
}

/// Process-local output pin backed by an atomic level.
///
/// Stands in for a board HAL pin when the service runs without real GPIO.
/// Clones share one level, so a retained handle observes writes made through
/// the actuator.
#[derive(Debug, Clone)]
pub struct SoftPin {
    number: u8,
    level: Arc<AtomicBool>,
}

impl SoftPin {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            level: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current logical level (true = HIGH).
    pub fn is_high(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}

impl ErrorType for SoftPin {
    type Error = Infallible;
}

impl OutputPin for SoftPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.store(false, Ordering::SeqCst);
        debug!("Pin {} set LOW", self.number);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.store(true, Ordering::SeqCst);
        debug!("Pin {} set HIGH", self.number);
        Ok(())
    }
}

impl StatefulOutputPin for SoftPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.load(Ordering::SeqCst))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.load(Ordering::SeqCst))
    }
}
