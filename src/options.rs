use std::num::ParseIntError;
use std::path::PathBuf;

use crate::consts;
use crate::keyboard::Framing;
use crate::parse;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Reprogram the keymap of a DURGOD Taurus keyboard")]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,

    #[clap(flatten)]
    pub devel_options: DevelOptions,
}

#[derive(Args)]
#[clap(next_help_heading = "Internal options (use with caution)")]
pub struct DevelOptions {
    #[arg(long, default_value_t=consts::VENDOR_ID, value_parser=hex_or_decimal, hide=true)]
    pub vendor_id: u16,

    #[arg(long, default_value_t=consts::PRODUCT_ID, value_parser=hex_or_decimal, hide=true)]
    pub product_id: u16,

    /// USB bus:address, needed when several keyboards are attached
    #[arg(long, value_parser=parse_address)]
    pub address: Option<(u8, u8)>,

    #[arg(long, default_value_t=consts::INTERFACE_NUMBER, hide=true)]
    pub interface_number: u8,

    #[arg(long, value_enum, default_value_t=Framing::default(), hide=true)]
    pub framing: Framing,
}

pub fn hex_or_decimal(s: &str) -> Result<u16, ParseIntError> {
    if s.to_ascii_lowercase().starts_with("0x") {
        u16::from_str_radix(&s[2..], 16)
    } else {
        s.parse()
    }
}

fn parse_address(s: &str) -> std::result::Result<(u8, u8), nom::error::Error<String>> {
    parse::from_str(parse::address, s)
}

#[derive(Subcommand)]
pub enum Command {
    /// Show supported key names
    ShowKeys,

    /// Parse a keymap file and print it as the physical key grid
    Show {
        /// Tab separated keymap file
        keymap: PathBuf,
    },

    /// Write a keymap file to the keyboard and save it to nvram
    Program {
        /// Tab separated keymap file
        keymap: PathBuf,
    },
}
