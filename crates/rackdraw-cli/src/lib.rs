//! Rackdraw CLI library
//!
//! This module contains the core CLI logic for the Rackdraw rack diagram
//! tool: it reads an inventory, places its racks and devices, and writes the
//! draw.io document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, Reportable, to_reportables};

use std::fs;

use log::info;

use rackdraw::{RackDiagramBuilder, RackError, inventory::Inventory};

/// Run the Rackdraw CLI application
///
/// This function reads the inventory file, places its racks and devices
/// with a [`RackDiagramBuilder`] and writes the draw.io document to the
/// output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `RackError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Inventory parsing errors
/// - Invalid racks or device attributes
pub fn run(args: &Args) -> Result<(), RackError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing inventory"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and parse the inventory
    let source = fs::read_to_string(&args.input)?;
    let inventory = Inventory::from_toml(&source)?;

    // Place racks and devices using the RackDiagramBuilder API
    let mut builder = RackDiagramBuilder::new(app_config);
    inventory.apply(&mut builder)?;

    // Write output file
    builder.save_to_file(&args.output)?;

    info!(
        output_file = args.output,
        pages = builder.document().pages().len();
        "draw.io document exported successfully"
    );

    Ok(())
}
