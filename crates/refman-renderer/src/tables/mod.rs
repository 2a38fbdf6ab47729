//! Table directives.
//!
//! Manual pages describe tabular data as list items rather than pipe
//! tables, one `* -` row marker per row and one `-` item per cell.
//! [`ListTableDirective`] renders that syntax with author supplied
//! presentation options. [`ParametersTableDirective`] builds on it for
//! the three column parameter tables used throughout function
//! reference pages, pinning the presentation and prepending the
//! column headings so authors only write the data rows.

mod list_table;
mod parameters;

pub use list_table::{ListTableDirective, TableOptions};
pub use parameters::ParametersTableDirective;
