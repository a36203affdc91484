//! The squares-client executable supports the following command line arguments:
//!
//! `squares-client set <KIND> <KEY> <SQUAREID> <SQUARETYPE> [DESCRIPTION] [--addr IP-PORT]`
//!
//!     Create or replace the entity at KIND/KEY.
//!     --addr accepts an IP address, either v4 or v6, and a port number, with the format IP:PORT. If --addr is not specified then connect on 127.0.0.1:4000.
//!     Print an error and return a non-zero exit code on server error, or if IP-PORT does not parse as an address.
//!
//! `squares-client get <KIND> <KEY> [--addr IP-PORT]`
//!
//!     Print the entity stored at KIND/KEY as JSON.
//!     A missing entity is reported by the server and treated as an error.
//!
//! `squares-client rm <KIND> <KEY> [--addr IP-PORT]`
//!
//!     Remove the entity stored at KIND/KEY. Removing a missing entity succeeds.
//!
//! `squares-client -V`
//!
//!     Print the version.

use std::net::SocketAddr;
use std::process::exit;

use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use squares::{KeyRequest, Result, SquaresClient, SquaresError, UpsertRequest};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_ADDRESS: &str = "127.0.0.1:4000";

/// the request a single invocation sends
#[derive(Debug)]
enum Request {
    Set(UpsertRequest),
    Get(KeyRequest),
    Remove(KeyRequest),
}

/// ['Opt'] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    /// the server's ip:port
    addr: SocketAddr,
    req: Request,
}

impl Opt {
    /// validates the `addr` parameter is a valid IP address and PORT
    /// returns `Ok<Opt>` if everything is valid
    /// # Errors
    /// returns [`SquaresError::Parsing`] if one of the parameters is invalid
    ///
    fn build(addr: &str, req: Request) -> Result<Opt> {
        let addr: SocketAddr = addr.parse().map_err(|_| {
            SquaresError::Parsing(format!(
                "could not parse {} into an IP address and port",
                &addr
            ))
        })?;

        Ok(Opt { addr, req })
    }
}

fn main() {
    // configure a subscriber that will log messages to STDERR
    subscriber_config();

    let key_args = || {
        vec![
            Arg::with_name("KIND").required(true).index(1),
            Arg::with_name("KEY").required(true).index(2),
        ]
    };

    let matches = App::new("squares-client")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("sends upsert, get and delete requests to a squares-server")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommands(vec![
            SubCommand::with_name("set")
                .about("Create or replace the entity at KIND/KEY")
                .args(&key_args())
                .arg(Arg::with_name("SQUAREID").required(true).index(3))
                .arg(Arg::with_name("SQUARETYPE").required(true).index(4))
                .arg(Arg::with_name("DESCRIPTION").index(5)),
            SubCommand::with_name("get")
                .about("Get the entity stored at KIND/KEY")
                .args(&key_args()),
            SubCommand::with_name("rm")
                .about("Removes the entity stored at KIND/KEY")
                .args(&key_args()),
        ])
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT of the server to connect to")
                .global(true)
                .default_value(DEFAULT_ADDRESS),
        )
        .get_matches();

    // parse commands into an Opt struct, then run it
    if let Err(e) = parse_options(&matches).and_then(run) {
        eprintln!("{}", e);
        exit(1);
    }
}

/// runs the specified request on the [`SquaresClient`]
/// `opt` contains the server address and the request type to execute
fn run(opt: Opt) -> Result<()> {
    let client = SquaresClient::new(opt.addr);
    match opt.req {
        Request::Set(req) => println!("{}", client.set(&req)?),
        Request::Get(req) => println!("{}", serde_json::to_string(&client.get(&req)?)?),
        Request::Remove(req) => println!("{}", client.remove(&req)?),
    }
    Ok(())
}

/// parses the matches from the command line into an [`Opt`] struct
fn parse_options(matches: &ArgMatches) -> Result<Opt> {
    let key_request = |args: &ArgMatches| {
        KeyRequest::new(
            args.value_of("KIND").unwrap_or_default(),
            args.value_of("KEY").unwrap_or_default(),
        )
    };

    let (addr, req) = match matches.subcommand() {
        ("set", Some(args)) => {
            let req = UpsertRequest::new(
                key_request(args),
                args.value_of("SQUAREID").unwrap_or_default(),
                args.value_of("SQUARETYPE").unwrap_or_default(),
                args.value_of("DESCRIPTION").map(String::from),
            );
            (args.value_of("addr"), Request::Set(req))
        }
        ("get", Some(args)) => (args.value_of("addr"), Request::Get(key_request(args))),
        ("rm", Some(args)) => (args.value_of("addr"), Request::Remove(key_request(args))),
        (cmd, _) => {
            return Err(SquaresError::Parsing(format!("unknown command received: {}", cmd)))
        }
    };
    // `--addr` may be given before or after the subcommand
    let addr = addr.or_else(|| matches.value_of("addr"));
    Opt::build(addr.unwrap_or(DEFAULT_ADDRESS), req)
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        // only warnings and errors, the client's output goes to STDOUT
        .with_max_level(Level::WARN)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
