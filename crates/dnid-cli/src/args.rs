use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "dnid",
    version,
    about = "Apply a signing identity across generated build artifacts"
)]
pub struct Args {
    /// Identity name under config/identities (without .json)
    #[arg(long, default_value = "default")]
    pub identity: String,
}
