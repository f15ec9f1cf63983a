/// Domain Types Module
///
/// Typed parameters for the menu commands. Parsing user text into these
/// types is where validation happens; once a value is one of these, the
/// handlers can bind it without further checks.
use crate::core::{MarqueeError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a booking, as stored in `bookings.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Paid,
    Cancelled,
}

impl BookingStatus {
    /// The exact literal stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Paid => "Paid",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "paid" => Ok(BookingStatus::Paid),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(MarqueeError::Validation(format!(
                "unknown booking status '{}' (expected Pending, Paid or Cancelled)",
                other
            ))),
        }
    }
}

/// The seats reserved by a booking, stored as a comma-delimited list in
/// `bookings.seats` (e.g. "12,13,14").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatList(Vec<u32>);

impl SeatList {
    pub fn new(seats: Vec<u32>) -> Self {
        SeatList(seats)
    }

    pub fn seats(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for SeatList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        f.write_str(&rendered.join(","))
    }
}

impl FromStr for SeatList {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MarqueeError::Validation(
                "seat list must not be empty".to_string(),
            ));
        }
        let seats = trimmed
            .split(',')
            .map(|part| {
                part.trim().parse::<u32>().map_err(|_| {
                    MarqueeError::Validation(format!("'{}' is not a valid seat number", part.trim()))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        Ok(SeatList(seats))
    }
}

/// Attributes of a users row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub password: String,
}

/// Attributes of a movies row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
    pub country: String,
    pub description: String,
    pub duration_secs: i32,
    pub language: String,
    pub genre: String,
}

/// Attributes of a shows row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub id: i32,
    pub movie_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Attributes of a bookings row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub id: i32,
    pub status: BookingStatus,
    pub booked_at: NaiveDateTime,
    pub seats: SeatList,
    pub show_id: i32,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Paid,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_booking_status_is_case_insensitive() {
        assert_eq!(
            "PENDING".parse::<BookingStatus>().unwrap(),
            BookingStatus::Pending
        );
        assert_eq!(
            "cancelled".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn test_booking_status_rejects_unknown() {
        let err = "refunded".parse::<BookingStatus>().unwrap_err();
        match err {
            MarqueeError::Validation(msg) => assert!(msg.contains("refunded")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_seat_list_parsing() {
        let seats: SeatList = "12, 13,14".parse().unwrap();
        assert_eq!(seats.seats(), &[12, 13, 14]);
        assert_eq!(seats.to_string(), "12,13,14");
    }

    #[test]
    fn test_seat_list_rejects_garbage() {
        assert!("".parse::<SeatList>().is_err());
        assert!("12,x,14".parse::<SeatList>().is_err());
        assert!("12,,14".parse::<SeatList>().is_err());
    }
}
