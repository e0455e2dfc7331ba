use ac_core::frame::Conversion;
use anyhow::{Context, Result};

/// JSON form of the grid: `{"width", "height", "cells": [{"glyph", "color": [r, g, b]}]}`.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json(conversion: &Conversion) -> Result<String> {
    serde_json::to_string(&conversion.grid).context("Sérialisation JSON impossible")
}
