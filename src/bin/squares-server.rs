//! this binary starts the squares server
//! to see the list of commands, type: `squares-server --help`

use std::env::current_dir;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::exit;

use clap::{arg_enum, crate_version, value_t, App, Arg};
use squares::{MemoryStore, Result, SledStore, SquaresError, SquaresServer, StoreEngine};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Engine {
        sled,
        memory
    }
}

const DEFAULT_ADDRESS: &str = "127.0.0.1:4000";
const DEFAULT_ENGINE: Engine = Engine::sled;

/// ['Opt'] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    addr: SocketAddr,
    engine: Engine,
    data_dir: PathBuf,
}

impl Opt {
    /// validates the `addr` and `data_dir` parameters
    /// returns `Ok<Opt>` if everything is valid
    /// # Errors
    /// returns [`SquaresError::Parsing`] if one of the parameters is invalid
    ///
    fn build(addr: &str, engine: Engine, data_dir: Option<&str>) -> Result<Opt> {
        let addr: SocketAddr = addr.parse().map_err(|_| {
            SquaresError::Parsing(format!(
                "could not parse {} into an IP address and port",
                &addr
            ))
        })?;
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };

        Ok(Opt {
            addr,
            engine,
            data_dir,
        })
    }
}

fn main() {
    // set up a tracing subscriber to log to STDERR
    subscriber_config();

    // parse command line args
    let matches = App::new("squares-server")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("serves upsert, get and delete handlers over a key-value store")
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT that the server listens on")
                .env("SQUARES_ADDR")
                .default_value(DEFAULT_ADDRESS),
        )
        .arg(
            Arg::with_name("engine")
                .long("engine")
                .value_name("ENGINE_NAME")
                .help("sets the storage engine to use, either 'sled' or 'memory'")
                .env("SQUARES_ENGINE")
                .possible_values(&Engine::variants())
                .default_value("sled"),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .value_name("PATH")
                .help("the directory the sled engine keeps its data in, defaults to the current directory")
                .env("SQUARES_DATA_DIR"),
        )
        .get_matches();

    let addr = matches.value_of("addr").unwrap_or(DEFAULT_ADDRESS);
    let engine: Engine = value_t!(matches, "engine", Engine).unwrap_or(DEFAULT_ENGINE);
    let opt = match Opt::build(addr, engine, matches.value_of("data-dir")) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    // start the server
    if let Err(e) = run(opt) {
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    info!("squares-server {}", env!("CARGO_PKG_VERSION"));
    info!("Storage engine: {}", opt.engine);

    let rt = tokio::runtime::Runtime::new()?;
    match opt.engine {
        Engine::sled => rt.block_on(run_with_engine(SledStore::open(&opt.data_dir)?, opt.addr)),
        Engine::memory => rt.block_on(run_with_engine(MemoryStore::new(), opt.addr)),
    }
}

async fn run_with_engine<E: StoreEngine>(engine: E, addr: SocketAddr) -> Result<()> {
    let server = SquaresServer::new(engine);
    server.run(addr).await
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        // all spans/events with a level higher than TRACE (e.g, debug, info, warn, etc.)
        // will be written.
        .with_max_level(Level::TRACE)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
