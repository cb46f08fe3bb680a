//! Stream-aware formatted scanning: drive a regex over a buffered byte
//! stream, read exactly enough input to satisfy the pattern, and bind
//! captures to typed destinations.
//!
//! ```no_run
//! use rxscan::{scan, Pattern, RegexEngine, SourceAdapter, BytesDest, IntDest, Destination};
//! use rxscan::config::IntBase;
//! use std::io::Cursor;
//!
//! let mut adapter = SourceAdapter::new(Cursor::new(b"port: 8080\n".to_vec()));
//! let pattern = Pattern::<RegexEngine>::compile(r"\s*(.*?)\s*:\s*(\d+)\s*\n").unwrap();
//! let mut key = BytesDest::new();
//! let mut value: IntDest<i32> = IntDest::new(IntBase::Decimal);
//! let mut destinations: Vec<&mut dyn Destination> = vec![&mut key, &mut value];
//! let outcome = scan(&mut adapter, &pattern, &mut destinations);
//! assert!(outcome.is_matched());
//! ```

pub mod capture;
pub mod config;
pub mod convert;
pub mod driver;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod scan;
pub mod source;

pub use capture::CaptureRecord;
pub use config::ScanConfig;
pub use convert::{BoolDest, BytesDest, Destination, FloatDest, IntDest, SinkDest};
pub use driver::DriverOutcome;
pub use engine::regex_engine::RegexEngine;
pub use engine::MatchEngine;
pub use error::{ConversionError, ScanError};
pub use pattern::Pattern;
pub use scan::{
    scan, scan_str, scan_str_with_callouts, scan_with_callouts, scan_with_callouts_config,
    scan_with_config, ScanOutcome,
};
pub use source::{ByteSource, SourceAdapter};
