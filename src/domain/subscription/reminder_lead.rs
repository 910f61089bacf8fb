//! Reminder lead time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How many days before a payment the user wants to be reminded.
///
/// Only 1, 2, 3 and 7 days are offered. Zero, negative or any other value
/// means the user gets no reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReminderLead {
    #[default]
    Off,
    DaysBefore(u32),
}

impl ReminderLead {
    /// Lead times offered to the user, `0` meaning "off".
    pub const OFFERED_DAYS: [u32; 5] = [0, 1, 2, 3, 7];

    pub fn from_days(days: i64) -> Self {
        match days {
            1 | 2 | 3 | 7 => ReminderLead::DaysBefore(days as u32),
            _ => ReminderLead::Off,
        }
    }

    pub fn from_option(days: Option<i64>) -> Self {
        days.map(Self::from_days).unwrap_or_default()
    }

    /// Lead in days, `None` when reminders are off.
    pub fn days(&self) -> Option<u32> {
        match self {
            ReminderLead::Off => None,
            ReminderLead::DaysBefore(d) => Some(*d),
        }
    }

    /// Lead in days with `0` standing for "off".
    pub fn as_days(&self) -> u32 {
        self.days().unwrap_or(0)
    }

    pub fn is_off(&self) -> bool {
        matches!(self, ReminderLead::Off)
    }
}

impl Serialize for ReminderLead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.as_days())
    }
}

impl<'de> Deserialize<'de> for ReminderLead {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Option::<i64>::deserialize(deserializer)?;
        Ok(Self::from_option(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_values_map_to_days_before() {
        for days in [1, 2, 3, 7] {
            assert_eq!(
                ReminderLead::from_days(days),
                ReminderLead::DaysBefore(days as u32)
            );
        }
    }

    #[test]
    fn zero_negative_and_unrecognized_are_off() {
        assert!(ReminderLead::from_days(0).is_off());
        assert!(ReminderLead::from_days(-3).is_off());
        assert!(ReminderLead::from_days(5).is_off());
        assert!(ReminderLead::from_days(30).is_off());
        assert!(ReminderLead::from_option(None).is_off());
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ReminderLead::DaysBefore(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&ReminderLead::Off).unwrap(), "0");
    }

    #[test]
    fn deserializes_null_as_off() {
        let lead: ReminderLead = serde_json::from_str("null").unwrap();
        assert!(lead.is_off());
        let lead: ReminderLead = serde_json::from_str("7").unwrap();
        assert_eq!(lead.days(), Some(7));
    }
}
