use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Server host
    /// Optional. Overrides the host from the connection profile.
    #[clap(short = 'H', long, help = "server host to connect to")]
    host: Option<String>,

    /// Server port
    /// Optional. Overrides the port from the connection profile.
    #[clap(short = 'P', long, help = "server port to connect to")]
    port: Option<u16>,

    /// Profile name
    /// Optional. Connection profile to read host/port defaults from.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    /// Optional. Print verbose messages.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    host: Option<String>,
    port: Option<u16>,
    profile: String,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            host: args.host,
            port: args.port,
            profile: args.profile,
            verbose: args.verbose,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            host: args.host,
            port: args.port,
            profile: args.profile,
            verbose: args.verbose,
        }
    }

    pub fn host(&self) -> Option<&String> {
        self.host.as_ref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
