//! # polegrid-io: request and result I/O
//!
//! File and text boundary for the planner. Everything here either produces
//! a [`polegrid_core::PlanRequest`] (or its parts) or writes a result out;
//! no planning happens in this crate.
//!
//! | Input | Function |
//! |-------|----------|
//! | JSON request file | [`read_request`] |
//! | JSON request text | [`parse_request`] |
//! | CSV point list | [`read_points_csv`] |
//! | Inline cost JSON | [`parse_costs`] |
//!
//! Results are written with [`write_json`] / [`write_text`], to a file or
//! stdout.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polegrid_io::{parse_costs, read_points_csv};
//! use polegrid_core::PlanRequest;
//! use std::path::Path;
//!
//! fn main() -> Result<(), polegrid_io::IoError> {
//!     let import = read_points_csv(Path::new("village.csv"))?;
//!     let costs = parse_costs(r#"{"poleCost": 120}"#)?;
//!     let request = PlanRequest::new(import.points, costs);
//!     println!("{} points", request.points.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod output;
pub mod points;
pub mod request;

pub use error::{IoError, IoResult};
pub use output::{to_pretty_json, write_json, write_text};
pub use points::{parse_points_csv, read_points_csv, PointsImport};
pub use request::{parse_costs, parse_request, read_request};
