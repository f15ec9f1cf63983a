/// Menu Module
///
/// The main menu: selection parsing and the Running/Terminated dispatch
/// loop. Selections 1-14 map to handlers, 15 exits. An invalid selection
/// is reported and the loop keeps running without invoking anything.
use crate::core::db::DataAccess;
use crate::core::{MarqueeError, Result};
use crate::handlers::{gather, run, Outcome};
use crate::input::Prompter;
use crate::results_grid::ResultsGrid;
use std::io::Write;
use tracing::debug;

/// The selection number that exits the client.
pub const EXIT_SELECTION: u8 = 15;

/// One menu action. Discriminants match the menu numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    AddUser = 1,
    AddBooking = 2,
    AddMovieShowingToTheater = 3,
    CancelPendingBookings = 4,
    ChangeSeatsForBooking = 5,
    RemovePayment = 6,
    ClearCancelledBookings = 7,
    RemoveShowsOnDate = 8,
    ListTheatersPlayingShow = 9,
    ListShowsStartingAt = 10,
    ListLoveMovies = 11,
    ListUsersWithPendingBooking = 12,
    ListShowsForMovieAtCinema = 13,
    ListBookingsForUser = 14,
}

impl MenuItem {
    /// All items in menu order.
    pub const ALL: [MenuItem; 14] = [
        MenuItem::AddUser,
        MenuItem::AddBooking,
        MenuItem::AddMovieShowingToTheater,
        MenuItem::CancelPendingBookings,
        MenuItem::ChangeSeatsForBooking,
        MenuItem::RemovePayment,
        MenuItem::ClearCancelledBookings,
        MenuItem::RemoveShowsOnDate,
        MenuItem::ListTheatersPlayingShow,
        MenuItem::ListShowsStartingAt,
        MenuItem::ListLoveMovies,
        MenuItem::ListUsersWithPendingBooking,
        MenuItem::ListShowsForMovieAtCinema,
        MenuItem::ListBookingsForUser,
    ];

    /// Maps a menu number to its item.
    pub fn from_selection(selection: u8) -> Option<MenuItem> {
        MenuItem::ALL.get(selection.checked_sub(1)? as usize).copied()
    }

    /// The line shown for this item in the menu.
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::AddUser => "Add User",
            MenuItem::AddBooking => "Add Booking",
            MenuItem::AddMovieShowingToTheater => "Add Movie Showing for an Existing Theater",
            MenuItem::CancelPendingBookings => "Cancel Pending Bookings",
            MenuItem::ChangeSeatsForBooking => "Change Seats Reserved for a Booking",
            MenuItem::RemovePayment => "Remove a Payment",
            MenuItem::ClearCancelledBookings => "Clear Cancelled Bookings",
            MenuItem::RemoveShowsOnDate => "Remove Shows on a Given Date",
            MenuItem::ListTheatersPlayingShow => {
                "List all Theaters in a Cinema Playing a Given Show"
            }
            MenuItem::ListShowsStartingAt => "List all Shows that Start at a Given Time and Date",
            MenuItem::ListLoveMovies => {
                "List Movie Titles Containing \"love\" Released After 2010"
            }
            MenuItem::ListUsersWithPendingBooking => {
                "List the First Name, Last Name, and Email of Users with a Pending Booking"
            }
            MenuItem::ListShowsForMovieAtCinema => {
                "List Shows Playing a Given Movie at a Given Cinema During a Date Range"
            }
            MenuItem::ListBookingsForUser => "List Booking Info for a Given User",
        }
    }
}

/// A parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Handler(MenuItem),
    Exit,
}

/// Dispatcher states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Terminated,
}

/// Parses a menu selection.
///
/// # Errors
///
/// Returns `MarqueeError::Validation` for non-numeric input and for
/// numbers outside 1-15.
pub fn parse_selection(input: &str) -> Result<Selection> {
    let selection: u8 = input
        .trim()
        .parse()
        .map_err(|_| MarqueeError::Validation(format!("'{}' is not a menu option", input.trim())))?;
    if selection == EXIT_SELECTION {
        return Ok(Selection::Exit);
    }
    MenuItem::from_selection(selection)
        .map(Selection::Handler)
        .ok_or_else(|| MarqueeError::Validation(format!("'{}' is not a menu option", selection)))
}

/// Renders the main menu.
pub fn render_menu() -> String {
    let mut output = String::from("MAIN MENU\n---------\n");
    for (idx, item) in MenuItem::ALL.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", idx + 1, item.label()));
    }
    output.push_str(&format!("{}. EXIT", EXIT_SELECTION));
    output
}

/// The dispatch loop.
///
/// Loops in `Running`, reading a selection per iteration. Handler errors
/// are reported on `out` and the loop continues; selection 15 or end of
/// input transitions to `Terminated`, after which the store is closed
/// exactly once.
pub fn run_menu(
    store: &mut dyn DataAccess,
    input: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let mut state = MenuState::Running;

    while state == MenuState::Running {
        writeln!(out, "\n{}", render_menu())?;
        let line = match input.prompt("Please make your choice") {
            Ok(line) => line,
            Err(MarqueeError::Io(_)) => {
                debug!("input closed, leaving menu loop");
                state = MenuState::Terminated;
                continue;
            }
            Err(e) => return Err(e),
        };

        match parse_selection(&line) {
            Ok(Selection::Exit) => state = MenuState::Terminated,
            Ok(Selection::Handler(item)) => {
                match gather(item, input).and_then(|command| run(command, store)) {
                    Ok(outcome) => report(out, &outcome)?,
                    // Statement and validation failures are not fatal.
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    store.close();
    Ok(())
}

fn report(out: &mut dyn Write, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Written(count) => writeln!(out, "Done ({} rows affected)", count)?,
        Outcome::Rows(result) => {
            write!(out, "{}", ResultsGrid::from_result(result).render())?;
            writeln!(out, "({} rows)", result.row_count)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_handler_selections() {
        assert_eq!(
            parse_selection("1").unwrap(),
            Selection::Handler(MenuItem::AddUser)
        );
        assert_eq!(
            parse_selection(" 14 ").unwrap(),
            Selection::Handler(MenuItem::ListBookingsForUser)
        );
    }

    #[test]
    fn test_parse_exit_selection() {
        assert_eq!(parse_selection("15").unwrap(), Selection::Exit);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(parse_selection("0").is_err());
        assert!(parse_selection("16").is_err());
        assert!(parse_selection("99").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        match parse_selection("abc").unwrap_err() {
            MarqueeError::Validation(msg) => assert!(msg.contains("abc")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_menu_numbering_is_stable() {
        assert_eq!(MenuItem::from_selection(1), Some(MenuItem::AddUser));
        assert_eq!(
            MenuItem::from_selection(5),
            Some(MenuItem::ChangeSeatsForBooking)
        );
        assert_eq!(MenuItem::from_selection(15), None);

        for (idx, item) in MenuItem::ALL.iter().enumerate() {
            assert_eq!(*item as usize, idx + 1);
        }
    }

    #[test]
    fn test_render_menu_lists_all_items() {
        let rendered = render_menu();
        assert!(rendered.starts_with("MAIN MENU"));
        assert!(rendered.contains("1. Add User"));
        assert!(rendered.contains("5. Change Seats Reserved for a Booking"));
        assert!(rendered.contains("15. EXIT"));
    }
}
