/// Menu Handlers Module
///
/// One typed command per menu action, the prompts that gather each
/// command's parameters, and the data-access calls the command issues.
/// Statement templates are compile-time constants; every user-supplied
/// value is bound, never spliced into the text.
use crate::core::db::{BoundStatement, DataAccess, QueryResult, SqlValue};
use crate::core::{MarqueeError, Result};
use crate::domain::{BookingStatus, NewBooking, NewMovie, NewShow, NewUser, SeatList};
use crate::input::{
    read_date, read_datetime, read_i32, read_seats, read_status, read_text, read_time, Prompter,
};
use crate::menu::MenuItem;
use chrono::NaiveDate;

const INSERT_USER: &str =
    "INSERT INTO users (email, lname, fname, phone, pwd) VALUES ($1, $2, $3, $4, $5)";
const INSERT_BOOKING: &str =
    "INSERT INTO bookings (bid, status, bdatetime, seats, sid, email) \
     VALUES ($1, $2, $3, $4, $5, $6)";
const INSERT_MOVIE: &str =
    "INSERT INTO movies (mvid, title, rdate, country, description, duration, lang, genre) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";
const INSERT_SHOW: &str =
    "INSERT INTO shows (sid, mvid, sdate, sttime, edtime) VALUES ($1, $2, $3, $4, $5)";
const INSERT_PLAY: &str = "INSERT INTO plays (sid, tid) VALUES ($1, $2)";
const DELETE_BOOKINGS_WITH_STATUS: &str = "DELETE FROM bookings WHERE status = $1";
const SELECT_BOOKING_ID: &str = "SELECT bid FROM bookings WHERE bid = $1";
const UPDATE_BOOKING_SEATS: &str = "UPDATE bookings SET seats = $1 WHERE bid = $2";
const CANCEL_BOOKING: &str = "UPDATE bookings SET status = $1 WHERE bid = $2";
const DELETE_PAYMENTS_FOR_BOOKING: &str = "DELETE FROM payments WHERE bid = $1";
const DELETE_SHOWS_ON_DATE: &str = "DELETE FROM shows WHERE sdate = $1";
const THEATERS_PLAYING_SHOW: &str =
    "SELECT t.tname FROM theaters t JOIN plays p ON p.tid = t.tid WHERE p.sid = $1";
const SHOWS_STARTING_AT: &str =
    "SELECT sid, mvid, sdate, sttime, edtime FROM shows WHERE sdate = $1 AND sttime = $2";
const LOVE_TITLES_AFTER_2010: &str =
    "SELECT title FROM movies WHERE title LIKE '%Love%' AND rdate > DATE '2010-12-31'";
const USERS_WITH_PENDING_BOOKING: &str =
    "SELECT DISTINCT u.fname, u.lname, u.email FROM users u \
     JOIN bookings b ON b.email = u.email WHERE b.status = $1";
const SHOWS_FOR_MOVIE_AT_CINEMA: &str =
    "SELECT m.title, m.duration, s.sdate, s.sttime FROM movies m \
     JOIN shows s ON s.mvid = m.mvid \
     JOIN plays p ON p.sid = s.sid \
     JOIN theaters t ON t.tid = p.tid \
     WHERE m.title = $1 AND t.cid = $2 AND s.sdate BETWEEN $3 AND $4";
const BOOKINGS_FOR_USER: &str =
    "SELECT DISTINCT m.title, s.sdate, s.sttime, t.tname, b.seats FROM bookings b \
     JOIN shows s ON s.sid = b.sid \
     JOIN movies m ON m.mvid = s.mvid \
     JOIN plays p ON p.sid = s.sid \
     JOIN theaters t ON t.tid = p.tid \
     WHERE b.email = $1";

/// A menu action together with the typed parameters it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddUser(NewUser),
    AddBooking(NewBooking),
    AddMovieShowingToTheater {
        movie: NewMovie,
        show: NewShow,
        theater_id: i32,
    },
    CancelPendingBookings,
    ChangeSeatsForBooking {
        booking_id: i32,
        seats: SeatList,
    },
    RemovePayment {
        booking_id: i32,
    },
    ClearCancelledBookings,
    RemoveShowsOnDate {
        date: NaiveDate,
    },
    ListTheatersPlayingShow {
        show_id: i32,
    },
    ListShowsStartingAt {
        date: NaiveDate,
        start_time: chrono::NaiveTime,
    },
    ListLoveMoviesReleasedAfter2010,
    ListUsersWithPendingBooking,
    ListShowsForMovieAtCinema {
        title: String,
        cinema_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    },
    ListBookingsForUser {
        email: String,
    },
}

/// What a handler produced: a rows-affected count for writes, a result set
/// for reads.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Written(u64),
    Rows(QueryResult),
}

/// Collects the typed parameters for a menu selection and builds the
/// corresponding command.
///
/// # Errors
///
/// Returns `MarqueeError::Validation` when an answer fails to parse, and
/// propagates prompt I/O errors.
pub fn gather(item: MenuItem, input: &mut dyn Prompter) -> Result<Command> {
    match item {
        MenuItem::AddUser => Ok(Command::AddUser(NewUser {
            email: read_text(input, "Email")?,
            last_name: read_text(input, "Last name")?,
            first_name: read_text(input, "First name")?,
            phone: read_text(input, "Phone number")?,
            password: read_text(input, "Password")?,
        })),
        MenuItem::AddBooking => Ok(Command::AddBooking(NewBooking {
            id: read_i32(input, "Booking id")?,
            status: read_status(input, "Status")?,
            booked_at: read_datetime(input, "Booking date/time")?,
            seats: read_seats(input, "Seats")?,
            show_id: read_i32(input, "Show id")?,
            email: read_text(input, "User email")?,
        })),
        MenuItem::AddMovieShowingToTheater => {
            let movie = NewMovie {
                id: read_i32(input, "Movie id")?,
                title: read_text(input, "Movie title")?,
                release_date: read_date(input, "Release date")?,
                country: read_text(input, "Release country")?,
                description: read_text(input, "Description")?,
                duration_secs: read_i32(input, "Duration in seconds")?,
                language: read_text(input, "Language code")?,
                genre: read_text(input, "Genre")?,
            };
            let show = NewShow {
                id: read_i32(input, "Show id")?,
                movie_id: movie.id,
                date: read_date(input, "Show date")?,
                start_time: read_time(input, "Start time")?,
                end_time: read_time(input, "End time")?,
            };
            let theater_id = read_i32(input, "Theater id")?;
            Ok(Command::AddMovieShowingToTheater {
                movie,
                show,
                theater_id,
            })
        }
        MenuItem::CancelPendingBookings => Ok(Command::CancelPendingBookings),
        MenuItem::ChangeSeatsForBooking => Ok(Command::ChangeSeatsForBooking {
            booking_id: read_i32(input, "Booking id")?,
            seats: read_seats(input, "New seats")?,
        }),
        MenuItem::RemovePayment => Ok(Command::RemovePayment {
            booking_id: read_i32(input, "Booking id")?,
        }),
        MenuItem::ClearCancelledBookings => Ok(Command::ClearCancelledBookings),
        MenuItem::RemoveShowsOnDate => Ok(Command::RemoveShowsOnDate {
            date: read_date(input, "Show date")?,
        }),
        MenuItem::ListTheatersPlayingShow => Ok(Command::ListTheatersPlayingShow {
            show_id: read_i32(input, "Show id")?,
        }),
        MenuItem::ListShowsStartingAt => Ok(Command::ListShowsStartingAt {
            date: read_date(input, "Show date")?,
            start_time: read_time(input, "Start time")?,
        }),
        MenuItem::ListLoveMovies => Ok(Command::ListLoveMoviesReleasedAfter2010),
        MenuItem::ListUsersWithPendingBooking => Ok(Command::ListUsersWithPendingBooking),
        MenuItem::ListShowsForMovieAtCinema => Ok(Command::ListShowsForMovieAtCinema {
            title: read_text(input, "Movie title")?,
            cinema_id: read_i32(input, "Cinema id")?,
            from: read_date(input, "Start date")?,
            to: read_date(input, "End date")?,
        }),
        MenuItem::ListBookingsForUser => Ok(Command::ListBookingsForUser {
            email: read_text(input, "User email")?,
        }),
    }
}

/// Runs a command against the data-access layer.
pub fn run(command: Command, store: &mut dyn DataAccess) -> Result<Outcome> {
    match command {
        Command::AddUser(user) => add_user(store, user),
        Command::AddBooking(booking) => add_booking(store, booking),
        Command::AddMovieShowingToTheater {
            movie,
            show,
            theater_id,
        } => add_movie_showing(store, movie, show, theater_id),
        Command::CancelPendingBookings => {
            delete_bookings_with_status(store, BookingStatus::Pending)
        }
        Command::ChangeSeatsForBooking { booking_id, seats } => {
            change_seats(store, booking_id, seats)
        }
        Command::RemovePayment { booking_id } => remove_payment(store, booking_id),
        Command::ClearCancelledBookings => {
            delete_bookings_with_status(store, BookingStatus::Cancelled)
        }
        Command::RemoveShowsOnDate { date } => store
            .execute(DELETE_SHOWS_ON_DATE, &[SqlValue::Date(date)])
            .map(Outcome::Written),
        Command::ListTheatersPlayingShow { show_id } => store
            .query(THEATERS_PLAYING_SHOW, &[SqlValue::Int(show_id)])
            .map(Outcome::Rows),
        Command::ListShowsStartingAt { date, start_time } => store
            .query(
                SHOWS_STARTING_AT,
                &[SqlValue::Date(date), SqlValue::Time(start_time)],
            )
            .map(Outcome::Rows),
        Command::ListLoveMoviesReleasedAfter2010 => store
            .query(LOVE_TITLES_AFTER_2010, &[])
            .map(Outcome::Rows),
        Command::ListUsersWithPendingBooking => store
            .query(
                USERS_WITH_PENDING_BOOKING,
                &[SqlValue::Text(BookingStatus::Pending.to_string())],
            )
            .map(Outcome::Rows),
        Command::ListShowsForMovieAtCinema {
            title,
            cinema_id,
            from,
            to,
        } => store
            .query(
                SHOWS_FOR_MOVIE_AT_CINEMA,
                &[
                    SqlValue::Text(title),
                    SqlValue::Int(cinema_id),
                    SqlValue::Date(from),
                    SqlValue::Date(to),
                ],
            )
            .map(Outcome::Rows),
        Command::ListBookingsForUser { email } => store
            .query(BOOKINGS_FOR_USER, &[SqlValue::Text(email)])
            .map(Outcome::Rows),
    }
}

fn add_user(store: &mut dyn DataAccess, user: NewUser) -> Result<Outcome> {
    store
        .execute(
            INSERT_USER,
            &[
                SqlValue::Text(user.email),
                SqlValue::Text(user.last_name),
                SqlValue::Text(user.first_name),
                SqlValue::Text(user.phone),
                SqlValue::Text(user.password),
            ],
        )
        .map(Outcome::Written)
}

fn add_booking(store: &mut dyn DataAccess, booking: NewBooking) -> Result<Outcome> {
    store
        .execute(
            INSERT_BOOKING,
            &[
                SqlValue::Int(booking.id),
                SqlValue::Text(booking.status.to_string()),
                SqlValue::Timestamp(booking.booked_at),
                SqlValue::Text(booking.seats.to_string()),
                SqlValue::Int(booking.show_id),
                SqlValue::Text(booking.email),
            ],
        )
        .map(Outcome::Written)
}

/// The one multi-statement write. The three inserts travel as a single
/// atomic batch so a failure of the show or plays insert leaves no
/// orphaned movie row behind.
fn add_movie_showing(
    store: &mut dyn DataAccess,
    movie: NewMovie,
    show: NewShow,
    theater_id: i32,
) -> Result<Outcome> {
    let statements = [
        BoundStatement::new(
            INSERT_MOVIE,
            vec![
                SqlValue::Int(movie.id),
                SqlValue::Text(movie.title),
                SqlValue::Date(movie.release_date),
                SqlValue::Text(movie.country),
                SqlValue::Text(movie.description),
                SqlValue::Int(movie.duration_secs),
                SqlValue::Text(movie.language),
                SqlValue::Text(movie.genre),
            ],
        ),
        BoundStatement::new(
            INSERT_SHOW,
            vec![
                SqlValue::Int(show.id),
                SqlValue::Int(show.movie_id),
                SqlValue::Date(show.date),
                SqlValue::Time(show.start_time),
                SqlValue::Time(show.end_time),
            ],
        ),
        BoundStatement::new(
            INSERT_PLAY,
            vec![SqlValue::Int(show.id), SqlValue::Int(theater_id)],
        ),
    ];
    store.execute_atomic(&statements).map(Outcome::Written)
}

fn delete_bookings_with_status(
    store: &mut dyn DataAccess,
    status: BookingStatus,
) -> Result<Outcome> {
    store
        .execute(
            DELETE_BOOKINGS_WITH_STATUS,
            &[SqlValue::Text(status.to_string())],
        )
        .map(Outcome::Written)
}

/// Updates the seat list of an existing booking. The booking is looked up
/// first; an unknown id is a validation failure and issues no write.
fn change_seats(store: &mut dyn DataAccess, booking_id: i32, seats: SeatList) -> Result<Outcome> {
    let existing = store.query(SELECT_BOOKING_ID, &[SqlValue::Int(booking_id)])?;
    if existing.row_count == 0 {
        return Err(MarqueeError::Validation(format!(
            "no booking with id {}",
            booking_id
        )));
    }
    store
        .execute(
            UPDATE_BOOKING_SEATS,
            &[SqlValue::Text(seats.to_string()), SqlValue::Int(booking_id)],
        )
        .map(Outcome::Written)
}

/// Marks the booking cancelled, then deletes its payment rows, in that
/// order.
fn remove_payment(store: &mut dyn DataAccess, booking_id: i32) -> Result<Outcome> {
    let cancelled = store.execute(
        CANCEL_BOOKING,
        &[
            SqlValue::Text(BookingStatus::Cancelled.to_string()),
            SqlValue::Int(booking_id),
        ],
    )?;
    let deleted = store.execute(DELETE_PAYMENTS_FOR_BOOKING, &[SqlValue::Int(booking_id)])?;
    Ok(Outcome::Written(cancelled + deleted))
}
