use clap::Parser;
use marquee::core::db::{ConnectionParams, DataAccess, PgStore};
use marquee::input::StdinPrompter;
use marquee::menu::run_menu;
use std::io;
use std::process::ExitCode;
use tracing::info;

/// A menu-driven PostgreSQL client for a movie ticketing database.
#[derive(Parser, Debug)]
#[command(name = "marquee", version, about)]
struct Cli {
    /// Name of the database to connect to
    dbname: String,

    /// Port the PostgreSQL server listens on
    port: u16,

    /// Role to authenticate as
    user: String,

    /// Host the PostgreSQL server runs on
    #[arg(long, default_value = "localhost")]
    host: String,
}

fn main() -> ExitCode {
    // Initialize the logging system using tracing subscriber
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let params = ConnectionParams {
        host: cli.host,
        port: cli.port,
        dbname: cli.dbname,
        user: cli.user,
        // The password travels outside the positional arguments; empty
        // means trust/peer authentication.
        password: std::env::var("PGPASSWORD").unwrap_or_default(),
    };

    info!("connecting to {}", params.display_url());
    println!("Connecting to database...");
    let mut store = match PgStore::connect(&params) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Make sure PostgreSQL is running and reachable on this machine.");
            return ExitCode::FAILURE;
        }
    };
    println!("Done");

    let mut prompter = StdinPrompter::new();
    let result = run_menu(&mut store, &mut prompter, &mut io::stdout());

    // run_menu closes the store on its own exit paths; closing again here
    // covers its error path and is a no-op otherwise.
    store.close();

    match result {
        Ok(()) => {
            println!("Disconnecting from database... Bye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
