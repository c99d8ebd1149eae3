mod consts;
mod decoder;
mod keyboard;
mod keycode;
mod keymap;
mod messages;
mod options;
mod parse;
mod printer;

use crate::decoder::Decoder;
use crate::keyboard::{k320::KeyboardK320, UsbTransport};
use crate::keycode::KeyName;
use crate::keymap::Keymap;
use crate::messages::Messages;
use crate::options::{Command, DevelOptions, Options};
use crate::printer::Printer;

use anyhow::{anyhow, ensure, Result};
use indoc::indoc;
use itertools::Itertools;
use log::debug;
use rusb::{Context, Device, Direction, TransferType};

use anyhow::Context as _;
use clap::Parser as _;
use rusb::UsbContext as _;
use strum::IntoEnumIterator as _;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::parse();

    match &options.command {
        Command::ShowKeys => {
            println!("Keys:");
            for name in KeyName::iter() {
                println!(" - {name}");
            }
            println!();
            println!("Raw HID usage code syntax (hex with marker): 2ah");
        }

        Command::Show { keymap } => {
            let keymap = Keymap::from_file(keymap).context("load keymap")?;
            let chunks = Messages::chunks(&keymap);
            print!("{}", Printer::grid(&Decoder::decode_chunks(&chunks)));
        }

        Command::Program { keymap } => {
            let keymap = Keymap::from_file(keymap).context("load keymap")?;

            // show what is about to be written, frame by frame audit is
            // on the debug log
            let chunks = Messages::chunks(&keymap);
            print!("{}", Printer::grid(&Decoder::decode_chunks(&chunks)));

            let transport = open_transport(&options.devel_options)?;
            let mut keyboard = KeyboardK320::new(transport, options.devel_options.framing);
            keyboard.program(&keymap).context("program keyboard")?;
            println!("keymap written to keyboard");
        }
    }

    Ok(())
}

fn open_transport(options: &DevelOptions) -> Result<UsbTransport> {
    let device = find_device(options).context("find USB device")?;
    let (out_endpoint, in_endpoint) = find_endpoints(&device, options.interface_number)?;
    debug!("OUT: 0x{:02x} IN: 0x{:02x}", out_endpoint, in_endpoint);

    let mut handle = device.open().context("open USB device")?;
    let _ = handle.set_auto_detach_kernel_driver(true);
    handle
        .claim_interface(options.interface_number)
        .context("claim interface")?;

    Ok(UsbTransport::new(
        handle,
        options.interface_number,
        out_endpoint,
        in_endpoint,
    ))
}

fn find_device(options: &DevelOptions) -> Result<Device<Context>> {
    let usb_options = vec![
        #[cfg(windows)]
        rusb::UsbOption::use_usbdk(),
    ];
    let usb_context = Context::with_options(&usb_options)?;

    let mut found = vec![];
    for device in usb_context.devices().context("get USB device list")?.iter() {
        let desc = device.device_descriptor().context("get USB device info")?;
        debug!(
            "Bus {:03} Device {:03} ID {:04x}:{:04x}",
            device.bus_number(),
            device.address(),
            desc.vendor_id(),
            desc.product_id()
        );

        if desc.vendor_id() != options.vendor_id || desc.product_id() != options.product_id {
            continue;
        }
        if let Some((bus, addr)) = options.address {
            if device.bus_number() != bus || device.address() != addr {
                continue;
            }
        }
        found.push(device);
    }

    match found.len() {
        0 => Err(anyhow!(
            "keyboard not found. Use --vendor-id and --product-id to override defaults"
        )),
        1 => Ok(found.pop().unwrap()),
        _ => Err(anyhow!(
            indoc! {"
                Several compatible devices are found.
                Unfortunately, this model of keyboard doesn't have serial number.
                So specify USB address using --address option.

                Addresses:
                {}
            "},
            found
                .iter()
                .map(|device| format!("{}:{}", device.bus_number(), device.address()))
                .join("\n")
        )),
    }
}

/// Finds the interrupt OUT and IN endpoint pair on the keymap interface.
fn find_endpoints(device: &Device<Context>, interface_num: u8) -> Result<(u8, u8)> {
    let conf_desc = device
        .config_descriptor(0)
        .context("get config #0 descriptor")?;

    let intf = conf_desc
        .interfaces()
        .find(|iface| iface.number() == interface_num)
        .ok_or_else(|| {
            anyhow!(
                "interface #{} not found, interface numbers:\n{:#?}",
                interface_num,
                conf_desc.interfaces().map(|i| i.number()).format(", ")
            )
        })?;

    let intf_desc = intf.descriptors().exactly_one().map_err(|_| {
        anyhow!(
            "only one interface descriptor is expected, got:\n{:#?}",
            intf.descriptors().format("\n")
        )
    })?;
    ensure!(
        intf_desc.class_code() == 0x03,
        "unexpected interface parameters: {:#?}",
        intf_desc
    );

    let mut out_endpoint = None;
    let mut in_endpoint = None;
    for endpoint in intf_desc.endpoint_descriptors() {
        debug!("==> {:?} direction: {:?}", endpoint, endpoint.direction());
        if endpoint.transfer_type() != TransferType::Interrupt {
            continue;
        }
        match endpoint.direction() {
            Direction::Out => out_endpoint = Some(endpoint.address()),
            Direction::In => in_endpoint = Some(endpoint.address()),
        }
    }

    match (out_endpoint, in_endpoint) {
        (Some(out), Some(r#in)) => Ok((out, r#in)),
        _ => Err(anyhow!(
            "no interrupt OUT/IN endpoint pair on interface #{interface_num}"
        )),
    }
}
