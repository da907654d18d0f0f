//! Power rails and power domains

/// Supply rail feeding a group of pads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerLevel {
    /// 3.3 V rail
    #[default]
    V3_3,
    /// 1.8 V rail (retained in sleep)
    V1_8,
}

/// Switchable power domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerDomain {
    /// Communication domain (UARTs, pad latches)
    Communication,
    /// Peripheral domain (timers, DMA)
    Peripheral,
}

/// Power domain switch
pub trait PowerDomains {
    fn enable(&mut self, domain: PowerDomain);

    fn disable(&mut self, domain: PowerDomain);
}
