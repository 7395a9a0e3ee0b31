/// Octet value marking a date or time field as "unspecified" (any).
pub const UNSPECIFIED: u8 = 0xFF;

/// Years are carried on the wire as an offset from this epoch.
pub const EPOCH_YEAR: u16 = 1990;

/// A BACnet calendar date.
///
/// `year` is the actual year (e.g. 2024), or [`Date::UNSPECIFIED_YEAR`],
/// which is carried on the wire unchanged. `month` and `day` may hold the
/// wildcard values tested by the `is_*` helpers; any field may be
/// [`UNSPECIFIED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// 1 = Monday .. 7 = Sunday.
    pub day_of_week: u8,
}

impl Date {
    pub const UNSPECIFIED_YEAR: u16 = UNSPECIFIED as u16;
    /// Last year representable as an offset octet below the sentinel.
    pub const MAX_YEAR: u16 = EPOCH_YEAR + 254;

    pub const ODD_MONTHS: u8 = 13;
    pub const EVEN_MONTHS: u8 = 14;
    pub const LAST_DAY_OF_MONTH: u8 = 32;
    pub const ODD_DAYS: u8 = 33;
    pub const EVEN_DAYS: u8 = 34;

    pub const fn new(year: u16, month: u8, day: u8, day_of_week: u8) -> Self {
        Self {
            year,
            month,
            day,
            day_of_week,
        }
    }

    pub const fn is_year_unspecified(&self) -> bool {
        self.year == Self::UNSPECIFIED_YEAR
    }

    pub const fn is_odd_month(&self) -> bool {
        self.month == Self::ODD_MONTHS
    }

    pub const fn is_even_month(&self) -> bool {
        self.month == Self::EVEN_MONTHS
    }

    pub const fn is_last_day_of_month(&self) -> bool {
        self.day == Self::LAST_DAY_OF_MONTH
    }

    // ASHRAE 135 clause 20.2.12: 32 is last-day, 33 odd days, 34 even days.
    pub const fn is_odd_day_of_month(&self) -> bool {
        self.day == Self::ODD_DAYS
    }

    pub const fn is_even_day_of_month(&self) -> bool {
        self.day == Self::EVEN_DAYS
    }

    /// The year octet as carried on the wire.
    pub const fn wire_year(&self) -> Option<u8> {
        if self.is_year_unspecified() {
            Some(UNSPECIFIED)
        } else if self.year >= EPOCH_YEAR && self.year <= Self::MAX_YEAR {
            Some((self.year - EPOCH_YEAR) as u8)
        } else {
            None
        }
    }

    /// Reconstructs the year from its wire octet.
    pub const fn year_from_wire(octet: u8) -> u16 {
        if octet == UNSPECIFIED {
            Self::UNSPECIFIED_YEAR
        } else {
            EPOCH_YEAR + octet as u16
        }
    }
}

/// A BACnet time of day.
///
/// The wire carries hundredths of a second; `millisecond` loses anything
/// below 10 ms on encode. `hour`, `minute` and `second` may be
/// [`UNSPECIFIED`]; an unspecified `millisecond` is
/// [`Time::UNSPECIFIED_MILLISECOND`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl Time {
    /// Milliseconds that put the [`UNSPECIFIED`] octet on the wire.
    pub const UNSPECIFIED_MILLISECOND: u16 = UNSPECIFIED as u16 * 10;

    pub const fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// The hundredths octet as carried on the wire, if `millisecond` fits.
    pub const fn hundredths(&self) -> Option<u8> {
        let centis = self.millisecond / 10;
        if centis > u8::MAX as u16 {
            None
        } else {
            Some(centis as u8)
        }
    }

    pub const fn from_wire(hour: u8, minute: u8, second: u8, hundredths: u8) -> Self {
        Self::new(hour, minute, second, hundredths as u16 * 10)
    }
}
