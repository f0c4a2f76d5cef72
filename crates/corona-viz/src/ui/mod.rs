pub mod bindings;
pub mod help_overlay;
pub mod readout;
