pub mod header;
pub mod xcconfig;

/// First line of every generated text artifact.
pub const GENERATED_NOTICE: &str = "// This file is auto-generated. Run make identity to update.";
