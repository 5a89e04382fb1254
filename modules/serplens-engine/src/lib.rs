pub mod analysis;
pub mod fetch;
pub mod report;
pub mod serp;

pub use analysis::{analyze_site, PhraseTagger};
pub use fetch::{HttpFetcher, PageFetcher};
pub use report::build_report;
pub use serp::get_rankings;
