use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(short, long, value_name = "FLOAT", help = "Frame rate, i.e. number of frames per second", default_value_t = 60.0)]
    pub frame_rate: f64,

    #[arg(short, long, value_name = "INT", help = "Seed for reproducible obstacle placement")]
    pub seed: Option<u64>,
}
