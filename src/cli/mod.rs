mod list;
mod scan;

pub use list::{run_list, CardInfo, ListOptions, ListResult};
pub use scan::{run_scan, ScanOptions, ScanStats};
