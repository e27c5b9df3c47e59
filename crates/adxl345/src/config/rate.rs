use crate::error::Error;

/// One entry of a rate table.
///
/// A request of `hz` selects the first step whose `max_hz` is at least `hz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateStep {
    /// Largest request (in Hz) served by this step.
    pub max_hz: u32,
    /// BW_RATE code written to the device.
    pub code: u8,
    /// Nominal output data rate in milli-hertz.
    pub nominal_millihz: u32,
}

impl RateStep {
    /// Creates a new rate step.
    pub const fn new(max_hz: u32, code: u8, nominal_millihz: u32) -> Self {
        Self {
            max_hz,
            code,
            nominal_millihz,
        }
    }
}

const STANDARD_STEPS: [RateStep; 9] = [
    RateStep::new(6, 0x06, 6_250),
    RateStep::new(12, 0x07, 12_500),
    RateStep::new(25, 0x08, 25_000),
    RateStep::new(50, 0x09, 50_000),
    RateStep::new(100, 0x0A, 100_000),
    RateStep::new(200, 0x0B, 200_000),
    RateStep::new(400, 0x0C, 400_000),
    RateStep::new(800, 0x0D, 800_000),
    RateStep::new(1600, 0x0E, 1_600_000),
];

const STANDARD_CEILING: RateStep = RateStep::new(3200, 0x0F, 3_200_000);

/// Ascending mapping from requested rates to BW_RATE codes.
///
/// Requests round up to the next supported rate. Anything past the last step selects
/// the ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateTable {
    steps: &'static [RateStep],
    ceiling: RateStep,
}

impl RateTable {
    /// Normal-power rates from 6.25 Hz to 3200 Hz.
    pub const STANDARD: Self = Self {
        steps: &STANDARD_STEPS,
        ceiling: STANDARD_CEILING,
    };

    /// Creates a table from ascending steps and a ceiling.
    ///
    /// Returns `InvalidArgument` if the steps are not strictly ascending, or if the
    /// ceiling does not lie above the last step.
    pub const fn new(steps: &'static [RateStep], ceiling: RateStep) -> Result<Self, Error> {
        let mut idx = 0;
        let mut prev = 0u32;
        while idx < steps.len() {
            if steps[idx].max_hz <= prev {
                return Err(Error::InvalidArgument);
            }
            prev = steps[idx].max_hz;
            idx += 1;
        }
        if ceiling.max_hz < prev {
            return Err(Error::InvalidArgument);
        }
        Ok(Self { steps, ceiling })
    }

    /// Returns the step serving a request of `hz`. Zero is rejected.
    pub const fn select(&self, hz: u32) -> Result<RateStep, Error> {
        if hz == 0 {
            return Err(Error::InvalidArgument);
        }
        let mut idx = 0;
        while idx < self.steps.len() {
            if hz <= self.steps[idx].max_hz {
                return Ok(self.steps[idx]);
            }
            idx += 1;
        }
        Ok(self.ceiling)
    }

    /// Returns the step used for requests above the table.
    pub const fn ceiling(&self) -> RateStep {
        self.ceiling
    }

    /// Returns the ordered steps below the ceiling.
    pub const fn steps(&self) -> &'static [RateStep] {
        self.steps
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
