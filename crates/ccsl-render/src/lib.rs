//! # ccsl-render
//!
//! Themed terminal rendering for the ccsl status line.
//!
//! This crate is the rendering sink for the metrics pipeline: it consumes a
//! set of derived metric values and produces the final styled line. It makes
//! no decisions about the metrics themselves; an absent metric drops its
//! field from the line.
//!
//! This crate provides:
//! - [`Theme`] - 256-color palettes for the field color roles
//! - [`Field`] - Displayable fields and their canonical order
//! - [`render`] - Status line assembly with separator and powerline styles

pub mod color;
pub mod fields;
pub mod format;
pub mod line;
pub mod theme;

pub use color::{paint, RESET};
pub use fields::{parse_field_list, Field};
pub use format::{format_cost, format_duration, format_number, NumberStyle};
pub use line::{render, RenderConfig, StatusContext, Style};
pub use theme::{Theme, ThemeColors};
