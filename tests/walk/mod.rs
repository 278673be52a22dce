//! End-to-end walker tests, grouped by behavior.

mod tests_partitioning;
mod tests_reexports;
